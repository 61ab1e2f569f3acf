//! Crawler-aware Page Routes
//!
//! `/`, `/jobs` and `/jobs/:id` serve a synthesized, validated document to
//! crawlers and the SPA shell to everyone else. Every page response carries
//! `Vary: User-Agent`. Also serves `robots.txt` and `sitemap.xml`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use jobboard_core::JobRecord;
use jobboard_ssr::{escape, is_bot, Synthesizer};
use uuid::Uuid;

use super::jobs::ListJobsQuery;
use crate::{
    cached_store::CachedJobStore,
    error::{ApiError, ApiResult},
    state::AppState,
};

fn is_crawler(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(is_bot)
        .unwrap_or(false)
}

fn page(status: StatusCode, html: String) -> Response {
    (
        status,
        [(header::VARY, HeaderValue::from_static("User-Agent"))],
        Html(html),
    )
        .into_response()
}

fn spa(shell: &str, status: StatusCode) -> Response {
    page(status, shell.to_string())
}

// ============================================================================
// PAGE HANDLERS
// ============================================================================

/// GET / - Homepage
pub async fn homepage(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if !is_crawler(&headers) {
        return Ok(spa(&state.spa_shell, StatusCode::OK));
    }

    let stats = state.store.stats().await?;
    let limit = state.synthesizer.config().recent_items_on_homepage;
    let recent = state.store.recent(limit).await?;
    let html = state.synthesizer.render_homepage(stats.value(), &recent)?;
    Ok(page(StatusCode::OK, html))
}

/// GET /jobs - Listing page
///
/// `total` counts every match; the page holds the first `limit` of them
/// (or the cache's default page size).
pub async fn listing(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListJobsQuery>,
) -> ApiResult<Response> {
    if !is_crawler(&headers) {
        return Ok(spa(&state.spa_shell, StatusCode::OK));
    }

    let mut filters = query.into_filters();
    let page_size = filters
        .limit
        .take()
        .filter(|limit| *limit > 0)
        .unwrap_or_else(|| state.store.cache().config().default_page_size);

    let read = state.store.listing(&filters).await?;
    let all = read.value();
    let items = &all[..all.len().min(page_size)];
    let html = state
        .synthesizer
        .render_listing_page(items, all.len(), &filters)?;
    Ok(page(StatusCode::OK, html))
}

/// GET /jobs/:id - Detail page
///
/// Unknown or malformed ids are 404 for both audiences.
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> ApiResult<Response> {
    let crawler = is_crawler(&headers);
    let job = match Uuid::parse_str(&raw_id) {
        Ok(id) => state.store.get_job(id).await?,
        Err(_) => None,
    };

    match (job, crawler) {
        (Some(job), true) => {
            let html = state.synthesizer.render_detail_page(&job)?;
            Ok(page(StatusCode::OK, html))
        }
        (Some(_), false) => Ok(spa(&state.spa_shell, StatusCode::OK)),
        (None, true) => Err(ApiError::job_not_found(raw_id)),
        (None, false) => Ok(spa(&state.spa_shell, StatusCode::NOT_FOUND)),
    }
}

// ============================================================================
// ROBOTS AND SITEMAP
// ============================================================================

/// GET /robots.txt
pub async fn robots(State(synthesizer): State<Arc<Synthesizer>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&synthesizer.config().base_url),
    )
}

/// GET /sitemap.xml
pub async fn sitemap(
    State(store): State<CachedJobStore>,
    State(synthesizer): State<Arc<Synthesizer>>,
) -> ApiResult<impl IntoResponse> {
    let mut jobs = store.all_records().await?;
    jobs.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap_xml(&synthesizer.config().base_url, &jobs),
    ))
}

fn robots_txt(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {base_url}/sitemap.xml\n")
}

fn sitemap_xml(base_url: &str, jobs: &[JobRecord]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    let mut push = |loc: String, lastmod: Option<String>| {
        xml.push_str("<url><loc>");
        xml.push_str(&escape(&loc));
        xml.push_str("</loc>");
        if let Some(lastmod) = lastmod {
            xml.push_str("<lastmod>");
            xml.push_str(&lastmod);
            xml.push_str("</lastmod>");
        }
        xml.push_str("</url>\n");
    };

    let newest = jobs.first().map(|j| j.date_posted.format("%Y-%m-%d").to_string());
    push(format!("{base_url}/"), newest.clone());
    push(format!("{base_url}/jobs"), newest);
    for job in jobs {
        push(
            format!("{base_url}/jobs/{}", job.id),
            Some(job.date_posted.format("%Y-%m-%d").to_string()),
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/jobs", get(listing))
        .route("/jobs/:id", get(detail))
        .route("/robots.txt", get(robots))
        .route("/sitemap.xml", get(sitemap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_test_utils::sample_board;

    #[test]
    fn test_robots_points_at_sitemap() {
        let robots = robots_txt("https://jobs.example.org");
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.ends_with("Sitemap: https://jobs.example.org/sitemap.xml\n"));
    }

    #[test]
    fn test_sitemap_lists_every_job() {
        let jobs: Vec<JobRecord> = sample_board().iter().map(|j| j.record()).collect();
        let xml = sitemap_xml("https://jobs.example.org", &jobs);
        assert_eq!(xml.matches("<url>").count(), jobs.len() + 2);
        assert!(xml.contains("<loc>https://jobs.example.org/</loc>"));
        for job in &jobs {
            assert!(xml.contains(&format!("/jobs/{}</loc>", job.id)));
        }
    }

    #[test]
    fn test_crawler_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_crawler(&headers));
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (compatible; Googlebot/2.1)"),
        );
        assert!(is_crawler(&headers));
    }
}
