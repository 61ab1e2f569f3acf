//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use jobboard_core::SiteConfig;
use jobboard_ssr::Synthesizer;
use jobboard_storage::{CacheConfig, JobCache, JobStore};

use crate::cached_store::CachedJobStore;
use crate::config::DEFAULT_SPA_SHELL;
use crate::error::ApiResult;

/// Application-wide state shared across all routes.
///
/// Everything is constructed explicitly and handed to the router, so each
/// test can build an isolated instance.
#[derive(Clone)]
pub struct AppState {
    /// Storage with the listing cache in front of it.
    pub store: CachedJobStore,
    pub synthesizer: Arc<Synthesizer>,
    /// Markup served to human visitors on page routes.
    pub spa_shell: Arc<str>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn JobStore>,
        cache_config: CacheConfig,
        site_config: SiteConfig,
        spa_shell: impl Into<Arc<str>>,
    ) -> ApiResult<Self> {
        let cache_config =
            cache_config.with_homepage_page_size(site_config.recent_items_on_homepage);
        let cache = Arc::new(JobCache::new(cache_config));
        let synthesizer = Arc::new(Synthesizer::new(site_config)?);
        Ok(Self {
            store: CachedJobStore::new(store, cache),
            synthesizer,
            spa_shell: spa_shell.into(),
            start_time: Instant::now(),
        })
    }

    /// Defaults throughout, with the built-in SPA shell.
    pub fn with_defaults(store: Arc<dyn JobStore>) -> ApiResult<Self> {
        Self::new(
            store,
            CacheConfig::default(),
            SiteConfig::default(),
            DEFAULT_SPA_SHELL,
        )
    }
}

crate::impl_from_ref!(CachedJobStore, store);
crate::impl_from_ref!(Arc<Synthesizer>, synthesizer);
crate::impl_from_ref!(Arc<str>, spa_shell);
crate::impl_from_ref!(Instant, start_time);
