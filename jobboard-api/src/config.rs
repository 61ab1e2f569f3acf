//! API Configuration Module
//!
//! Bind address, CORS, the SPA shell served to human visitors and an
//! optional seed file. Configuration is loaded from environment variables
//! with defaults suitable for development.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{ApiError, ApiResult};

/// Markup served to browsers when no SPA build is configured.
pub const DEFAULT_SPA_SHELL: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>Loading</title>\n</head>\n<body>\n<div id=\"root\"></div>\n<script type=\"module\" src=\"/assets/index.js\"></script>\n</body>\n</html>\n";

// ============================================================================
// API CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind.
    pub bind_host: String,

    pub port: u16,

    /// Allowed CORS origins. Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    /// Built SPA `index.html` served to human visitors on page routes.
    pub spa_index: Option<PathBuf>,

    /// JSON array of jobs ingested at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
            spa_index: None,
            seed_file: None,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `BOARD_API_BIND`: Interface to bind (default: 0.0.0.0)
    /// - `PORT` or `BOARD_API_PORT`: Port (default: 3000)
    /// - `BOARD_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `BOARD_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `BOARD_SPA_INDEX`: Path to the SPA shell
    /// - `BOARD_SEED_FILE`: Path to a JSON array of jobs to ingest at startup
    pub fn from_env() -> ApiResult<Self> {
        let defaults = Self::default();

        let bind_host = std::env::var("BOARD_API_BIND").unwrap_or(defaults.bind_host);

        let port = match std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("BOARD_API_PORT").ok())
        {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", raw)))?,
            None => defaults.port,
        };

        let cors_origins = std::env::var("BOARD_CORS_ORIGINS")
            .ok()
            .map(|s| jobboard_core::split_list(&s))
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("BOARD_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cors_max_age_secs);

        let path_var = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        };

        Ok(Self {
            bind_host,
            port,
            cors_origins,
            cors_max_age_secs,
            spa_index: path_var("BOARD_SPA_INDEX"),
            seed_file: path_var("BOARD_SEED_FILE"),
        })
    }

    /// Resolve the socket address to bind.
    pub fn socket_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>().map_err(|e| {
            ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
        })
    }

    /// Load the SPA shell, falling back to [`DEFAULT_SPA_SHELL`].
    pub async fn load_spa_shell(&self) -> ApiResult<String> {
        match &self.spa_index {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                ApiError::internal_error(format!(
                    "Failed to read SPA shell {}: {}",
                    path.display(),
                    e
                ))
            }),
            None => Ok(DEFAULT_SPA_SHELL.to_string()),
        }
    }
}
