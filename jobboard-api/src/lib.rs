//! Jobboard API - HTTP Layer
//!
//! Axum routes over the cached job store: JSON listings and statistics with
//! conditional GET, CRUD and bulk ingest (every mutation invalidates the
//! listing cache), crawler-aware SSR pages with SPA fallback, and health
//! checks.

pub mod cached_store;
pub mod config;
pub mod error;
pub mod macros;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use cached_store::CachedJobStore;
pub use config::{ApiConfig, DEFAULT_SPA_SHELL};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use state::AppState;
