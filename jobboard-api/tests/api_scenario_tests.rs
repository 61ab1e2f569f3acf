//! End-to-end HTTP scenarios driven through the router with `oneshot`.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use jobboard_api::{create_api_router, ApiConfig, AppState};
use jobboard_core::Job;
use jobboard_storage::InMemoryJobStore;
use jobboard_test_utils::{new_job_fixture, sample_board};
use serde_json::Value;
use tower::ServiceExt;

const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
const CHROME: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

fn test_app(jobs: Vec<Job>) -> Result<Router, String> {
    let state = AppState::with_defaults(Arc::new(InMemoryJobStore::with_jobs(jobs)))
        .map_err(|e| e.to_string())?;
    Ok(create_api_router(state, &ApiConfig::default()))
}

async fn send(app: &Router, request: Request<Body>) -> Result<Response, String> {
    app.clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {:?}", e))
}

fn get(uri: &str) -> Result<Request<Body>, String> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| format!("Failed to build request: {}", e))
}

fn get_with(uri: &str, name: header::HeaderName, value: &str) -> Result<Request<Body>, String> {
    Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .map_err(|e| format!("Failed to build request: {}", e))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Result<Request<Body>, String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .map_err(|e| format!("Failed to build request: {}", e))
}

async fn body_text(response: Response) -> Result<String, String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {:?}", e))?;
    String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
}

async fn body_json(response: Response) -> Result<Value, String> {
    let text = body_text(response).await?;
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse response: {}", e))
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ============================================================================
// LISTINGS AND CONDITIONAL GET
// ============================================================================

#[tokio::test]
async fn test_listing_etag_lifecycle() -> Result<(), String> {
    let board = sample_board();
    let kenya_job = board
        .iter()
        .find(|j| j.country == "Kenya")
        .map(|j| j.id)
        .ok_or("fixture has no Kenya job")?;
    let app = test_app(board)?;

    let first = send(&app, get("/api/jobs?country=Kenya")?).await?;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(header_value(&first, "x-cache").as_deref(), Some("MISS"));
    let etag = header_value(&first, "etag").ok_or("missing ETag")?;
    assert!(etag.starts_with('"') && etag.ends_with('"'));
    let body = body_json(first).await?;
    assert_eq!(body["total"], 5);
    assert_eq!(body["cached"], false);

    let second = send(&app, get("/api/jobs?country=Kenya")?).await?;
    assert_eq!(header_value(&second, "x-cache").as_deref(), Some("HIT"));
    assert_eq!(header_value(&second, "etag"), Some(etag.clone()));

    let conditional = send(
        &app,
        get_with("/api/jobs?country=Kenya", header::IF_NONE_MATCH, &etag)?,
    )
    .await?;
    assert_eq!(conditional.status(), StatusCode::NOT_MODIFIED);
    assert!(body_text(conditional).await?.is_empty());

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/jobs/{}", kenya_job))
        .body(Body::empty())
        .map_err(|e| e.to_string())?;
    assert_eq!(send(&app, delete).await?.status(), StatusCode::NO_CONTENT);

    let after = send(
        &app,
        get_with("/api/jobs?country=Kenya", header::IF_NONE_MATCH, &etag)?,
    )
    .await?;
    assert_eq!(after.status(), StatusCode::OK);
    assert_ne!(header_value(&after, "etag"), Some(etag));
    assert_eq!(body_json(after).await?["total"], 4);
    Ok(())
}

#[tokio::test]
async fn test_filter_order_shares_etag() -> Result<(), String> {
    let app = test_app(sample_board())?;
    let a = send(&app, get("/api/jobs?country=Kenya,Uganda")?).await?;
    let b = send(&app, get("/api/jobs?country=uganda,%20kenya")?).await?;
    assert_eq!(header_value(&a, "etag"), header_value(&b, "etag"));
    assert_eq!(header_value(&b, "x-cache").as_deref(), Some("HIT"));
    Ok(())
}

#[tokio::test]
async fn test_stats_conditional() -> Result<(), String> {
    let app = test_app(sample_board())?;
    let first = send(&app, get("/api/stats")?).await?;
    let etag = header_value(&first, "etag").ok_or("missing ETag")?;
    let body = body_json(first).await?;
    assert_eq!(body["totalJobs"], 7);

    let again = send(&app, get_with("/api/stats", header::IF_NONE_MATCH, "*")?).await?;
    assert_eq!(again.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(header_value(&again, "etag"), Some(etag));
    Ok(())
}

// ============================================================================
// CRUD AND BULK INGEST
// ============================================================================

#[tokio::test]
async fn test_create_update_and_get() -> Result<(), String> {
    let app = test_app(Vec::new())?;
    let new_job = serde_json::to_value(new_job_fixture("Uganda", "Protection"))
        .map_err(|e| e.to_string())?;

    let created = send(&app, json_request("POST", "/api/jobs", &new_job)?).await?;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await?;
    let id = created["id"].as_str().ok_or("missing id")?.to_string();

    let update = serde_json::json!({ "title": "Senior Protection Officer" });
    let updated = send(&app, json_request("PUT", &format!("/api/jobs/{id}"), &update)?).await?;
    assert_eq!(updated.status(), StatusCode::OK);

    let fetched = body_json(send(&app, get(&format!("/api/jobs/{id}"))?).await?).await?;
    assert_eq!(fetched["title"], "Senior Protection Officer");
    assert_eq!(fetched["country"], "Uganda");

    let listing = body_json(send(&app, get("/api/jobs?search=senior")?).await?).await?;
    assert_eq!(listing["total"], 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_job_is_404() -> Result<(), String> {
    let app = test_app(sample_board())?;
    let response = send(&app, get(&format!("/api/jobs/{}", uuid::Uuid::now_v7()))?).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await?["code"], "JOB_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_blank_title_rejected() -> Result<(), String> {
    let app = test_app(Vec::new())?;
    let mut new_job = serde_json::to_value(new_job_fixture("Kenya", "Health"))
        .map_err(|e| e.to_string())?;
    new_job["title"] = Value::from("  ");
    let response = send(&app, json_request("POST", "/api/jobs", &new_job)?).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_bulk_ingest_prewarms_cache() -> Result<(), String> {
    let app = test_app(Vec::new())?;
    let jobs = serde_json::to_value(sample_board()).map_err(|e| e.to_string())?;

    let response = send(&app, json_request("POST", "/api/jobs/bulk", &jobs)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["written"], 7);
    assert!(body["cacheEntries"].as_u64().unwrap_or(0) > 0);

    let kenya = send(&app, get("/api/jobs?country=Kenya")?).await?;
    assert_eq!(header_value(&kenya, "x-cache").as_deref(), Some("HIT"));

    let health = body_json(send(&app, get("/health/cache")?).await?).await?;
    assert_eq!(health["status"], "healthy");
    assert!(health["cache"]["hits"].as_u64().unwrap_or(0) >= 1);
    Ok(())
}

// ============================================================================
// CRAWLER PAGES
// ============================================================================

#[tokio::test]
async fn test_homepage_for_crawler_and_browser() -> Result<(), String> {
    let app = test_app(sample_board())?;

    let crawler = send(&app, get_with("/", header::USER_AGENT, GOOGLEBOT)?).await?;
    assert_eq!(crawler.status(), StatusCode::OK);
    assert_eq!(header_value(&crawler, "vary").as_deref(), Some("User-Agent"));
    assert!(header_value(&crawler, "content-type")
        .unwrap_or_default()
        .starts_with("text/html"));
    let html = body_text(crawler).await?;
    assert_eq!(html.matches("<h1").count(), 1);
    assert!(html.contains("\"@type\":\"WebSite\""));

    let browser = send(&app, get_with("/", header::USER_AGENT, CHROME)?).await?;
    assert_eq!(header_value(&browser, "vary").as_deref(), Some("User-Agent"));
    let shell = body_text(browser).await?;
    assert!(shell.contains("<div id=\"root\"></div>"));
    assert!(!shell.contains("<h1"));
    Ok(())
}

#[tokio::test]
async fn test_listing_page_for_crawler() -> Result<(), String> {
    let app = test_app(sample_board())?;
    let response = send(
        &app,
        get_with("/jobs?country=Kenya&limit=2", header::USER_AGENT, GOOGLEBOT)?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await?;
    assert!(html.contains("<h1>Humanitarian Jobs in Kenya</h1>"));
    assert!(html.contains("5 open positions match this search. Showing 2"));
    Ok(())
}

#[tokio::test]
async fn test_detail_page_routes() -> Result<(), String> {
    let board = sample_board();
    let id = board[0].id;
    let app = test_app(board)?;

    let crawler = send(
        &app,
        get_with(&format!("/jobs/{id}"), header::USER_AGENT, GOOGLEBOT)?,
    )
    .await?;
    assert_eq!(crawler.status(), StatusCode::OK);
    let html = body_text(crawler).await?;
    assert!(html.contains("\"@type\":\"JobPosting\""));
    assert!(html.contains(&format!("https://jobs.example.org/jobs/{id}")));

    let browser = send(&app, get(&format!("/jobs/{id}"))?).await?;
    assert_eq!(browser.status(), StatusCode::OK);

    let missing = format!("/jobs/{}", uuid::Uuid::now_v7());
    let crawler_missing = send(&app, get_with(&missing, header::USER_AGENT, GOOGLEBOT)?).await?;
    assert_eq!(crawler_missing.status(), StatusCode::NOT_FOUND);
    let browser_missing = send(&app, get(&missing)?).await?;
    assert_eq!(browser_missing.status(), StatusCode::NOT_FOUND);

    let malformed = send(&app, get_with("/jobs/not-a-uuid", header::USER_AGENT, GOOGLEBOT)?).await?;
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_robots_and_sitemap() -> Result<(), String> {
    let app = test_app(sample_board())?;

    let robots = body_text(send(&app, get("/robots.txt")?).await?).await?;
    assert!(robots.contains("Sitemap: https://jobs.example.org/sitemap.xml"));

    let sitemap = send(&app, get("/sitemap.xml")?).await?;
    assert_eq!(sitemap.status(), StatusCode::OK);
    let xml = body_text(sitemap).await?;
    assert_eq!(xml.matches("<url>").count(), 9);
    Ok(())
}

#[tokio::test]
async fn test_health_ping() -> Result<(), String> {
    let app = test_app(Vec::new())?;
    let response = send(&app, get("/health/ping")?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "pong");
    Ok(())
}
