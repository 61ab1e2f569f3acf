//! Structured data (schema.org JSON-LD) for synthesized pages.

use jobboard_core::{Job, JobRecord, SiteConfig};
use serde_json::{json, Map, Value};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// `WebSite` with a search action pointing at the listing page.
pub fn website(config: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": config.site_name,
        "url": config.absolute_url("/"),
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}?search={{search_term_string}}", config.absolute_url("/jobs")),
            "query-input": "required name=search_term_string",
        },
    })
}

/// `ItemList` of listing records, in display order.
pub fn item_list(config: &SiteConfig, items: &[JobRecord]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, job)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": config.absolute_url(&format!("/jobs/{}", job.id)),
                "name": job.title,
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "numberOfItems": items.len(),
        "itemListElement": elements,
    })
}

/// `JobPosting` for a single job.
///
/// Optional properties are omitted rather than emitted empty.
pub fn job_posting(config: &SiteConfig, job: &Job, description: &str) -> Value {
    let mut posting = Map::new();
    posting.insert("@context".into(), json!(SCHEMA_CONTEXT));
    posting.insert("@type".into(), json!("JobPosting"));
    posting.insert("title".into(), json!(job.title));
    posting.insert("description".into(), json!(description));
    posting.insert("datePosted".into(), json!(job.date_posted.to_rfc3339()));
    posting.insert(
        "identifier".into(),
        json!({
            "@type": "PropertyValue",
            "name": config.site_name,
            "value": job.id.to_string(),
        }),
    );
    posting.insert(
        "url".into(),
        json!(config.absolute_url(&format!("/jobs/{}", job.id))),
    );
    posting.insert(
        "hiringOrganization".into(),
        json!({ "@type": "Organization", "name": job.organization }),
    );

    if let Some(deadline) = job.deadline {
        posting.insert("validThrough".into(), json!(deadline.to_rfc3339()));
    }
    if !job.sector.trim().is_empty() {
        posting.insert("industry".into(), json!(job.sector));
    }

    let mut address = Map::new();
    address.insert("@type".into(), json!("PostalAddress"));
    if !job.location.trim().is_empty() {
        address.insert("addressLocality".into(), json!(job.location));
    }
    if !job.country.trim().is_empty() {
        address.insert("addressCountry".into(), json!(job.country));
    }
    if address.len() > 1 {
        posting.insert(
            "jobLocation".into(),
            json!({ "@type": "Place", "address": Value::Object(address) }),
        );
    }

    if let Some(qualifications) = job.qualifications.as_deref().filter(|q| !q.trim().is_empty()) {
        posting.insert("qualifications".into(), json!(qualifications));
    }
    if let Some(source) = job.source_url.as_deref().filter(|u| !u.trim().is_empty()) {
        posting.insert("sameAs".into(), json!(source));
    }

    Value::Object(posting)
}
