//! Job REST API Routes
//!
//! JSON endpoints for listings, statistics, CRUD and bulk ingest. Listing
//! and statistics reads honour `If-None-Match` against the cache ETag.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use jobboard_core::{split_list, BoardStats, Job, JobFilters, JobRecord, NewJob};
use jobboard_storage::JobUpdate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{conditional, if_none_match, not_modified};
use crate::{
    cached_store::CachedJobStore,
    error::{ApiError, ApiResult},
    state::AppState,
};

// ============================================================================
// TYPES
// ============================================================================

/// Listing query string: comma-separated `country` and `sector` lists, a
/// free-text `search` and a `limit`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsQuery {
    pub country: Option<String>,
    pub sector: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ListJobsQuery {
    pub fn into_filters(self) -> JobFilters {
        JobFilters {
            country: self.country.as_deref().map(split_list).unwrap_or_default(),
            sector: self.sector.as_deref().map(split_list).unwrap_or_default(),
            search: self.search,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsResponse<'a> {
    pub jobs: &'a [JobRecord],
    pub total: usize,
    /// Whether the listing was served from cache.
    pub cached: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse<'a> {
    #[serde(flatten)]
    pub stats: &'a BoardStats,
    pub cached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkIngestResponse {
    pub written: usize,
    /// Listing entries held after pre-warming.
    pub cache_entries: usize,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/jobs - Filtered listing, cached and conditional
pub async fn list_jobs(
    State(store): State<CachedJobStore>,
    headers: HeaderMap,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Response> {
    let filters = query.into_filters();

    if let Some(header) = if_none_match(&headers) {
        let etag = store.listing_etag(&filters);
        if etag.matches_header(header) {
            return not_modified(&etag);
        }
    }

    let read = store.listing(&filters).await?;
    let body = ListJobsResponse {
        jobs: read.value(),
        total: read.value().len(),
        cached: read.was_cache_hit(),
    };
    conditional(read.etag(), read.was_cache_hit(), Json(body))
}

/// GET /api/stats - Board statistics, cached and conditional
pub async fn get_stats(
    State(store): State<CachedJobStore>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if let Some(header) = if_none_match(&headers) {
        let etag = store.stats_etag();
        if etag.matches_header(header) {
            return not_modified(&etag);
        }
    }

    let read = store.stats().await?;
    let body = StatsResponse {
        stats: read.value(),
        cached: read.was_cache_hit(),
    };
    conditional(read.etag(), read.was_cache_hit(), Json(body))
}

/// GET /api/jobs/:id - Single job
pub async fn get_job(
    State(store): State<CachedJobStore>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    store
        .get_job(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::job_not_found(id))
}

/// POST /api/jobs - Create a job
pub async fn create_job(
    State(store): State<CachedJobStore>,
    Json(req): Json<NewJob>,
) -> ApiResult<impl IntoResponse> {
    if req.title.trim().is_empty() {
        return Err(ApiError::invalid_input("title must not be empty"));
    }
    let job = store.create_job(req).await?;
    tracing::info!(job_id = %job.id, "Job created");
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/:id - Update a job
pub async fn update_job(
    State(store): State<CachedJobStore>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobUpdate>,
) -> ApiResult<Json<Job>> {
    let job = store.update_job(id, req).await?;
    tracing::info!(job_id = %id, "Job updated");
    Ok(Json(job))
}

/// DELETE /api/jobs/:id - Delete a job
pub async fn delete_job(
    State(store): State<CachedJobStore>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    store.delete_job(id).await?;
    tracing::info!(job_id = %id, "Job deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/jobs/bulk - Upsert a batch of jobs and pre-warm the cache
pub async fn bulk_ingest(
    State(store): State<CachedJobStore>,
    Json(jobs): Json<Vec<Job>>,
) -> ApiResult<Json<BulkIngestResponse>> {
    let written = store.bulk_ingest(jobs).await?;
    Ok(Json(BulkIngestResponse {
        written,
        cache_entries: store.cache().len(),
    }))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/bulk", post(bulk_ingest))
        .route("/jobs/:id", get(get_job).put(update_job).delete(delete_job))
        .route("/stats", get(get_stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_filters() {
        let query = ListJobsQuery {
            country: Some("Kenya, Uganda,,".to_string()),
            sector: None,
            search: Some("nurse".to_string()),
            limit: Some(5),
        };
        let filters = query.into_filters();
        assert_eq!(filters.country, vec!["Kenya", "Uganda"]);
        assert!(filters.sector.is_empty());
        assert_eq!(filters.search_term(), Some("nurse"));
        assert_eq!(filters.limit, Some(5));
    }

    #[test]
    fn test_empty_query_has_no_filters() {
        assert_eq!(ListJobsQuery::default().into_filters(), JobFilters::new());
    }
}
