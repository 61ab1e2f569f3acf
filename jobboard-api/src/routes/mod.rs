//! HTTP Routes Module
//!
//! - `/api` JSON endpoints for listings, statistics, CRUD and bulk ingest
//! - Crawler-aware page routes with SPA fallback, robots.txt and sitemap.xml
//! - Health check endpoints
//! - CORS and request tracing layers

pub mod health;
pub mod jobs;
pub mod ssr;

use std::time::Duration;

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use jobboard_storage::ETag;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub use health::create_router as health_router;
pub use jobs::create_router as jobs_router;
pub use ssr::create_router as ssr_router;

// ============================================================================
// CONDITIONAL GET HELPERS
// ============================================================================

pub(crate) fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
}

fn etag_value(etag: &ETag) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(etag.as_str())
        .map_err(|e| ApiError::internal_error(format!("Unrepresentable ETag: {}", e)))
}

/// 304 carrying the validator the client already holds.
pub(crate) fn not_modified(etag: &ETag) -> ApiResult<Response> {
    Ok((
        StatusCode::NOT_MODIFIED,
        [
            (header::ETAG, etag_value(etag)?),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
    )
        .into_response())
}

/// 200 with `ETag`, revalidation policy and an `X-Cache` hit marker.
pub(crate) fn conditional(etag: &ETag, hit: bool, body: impl IntoResponse) -> ApiResult<Response> {
    let marker = if hit { "HIT" } else { "MISS" };
    Ok((
        [
            (header::ETAG, etag_value(etag)?),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (
                header::HeaderName::from_static("x-cache"),
                HeaderValue::from_static(marker),
            ),
        ],
        body,
    )
        .into_response())
}

// ============================================================================
// ROUTER
// ============================================================================

fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::IF_NONE_MATCH])
        .expose_headers([header::ETAG])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: Restricted origins");
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Assemble the full application router.
pub fn create_api_router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .nest("/api", jobs::create_router())
        .nest("/health", health::create_router())
        .merge(ssr::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
        .with_state(state)
}
