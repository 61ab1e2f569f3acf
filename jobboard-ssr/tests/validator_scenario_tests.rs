//! End-to-end validator and crawler-routing scenarios.

use jobboard_core::{BoardError, ContentError, SiteConfig};
use jobboard_ssr::{apply_sanity_checks, is_bot, render, Synthesizer};
use jobboard_test_utils::assertions::assert_sanity_check;
use jobboard_test_utils::{rich_job, thin_job};

const BROKEN_PAGE: &str = "<!DOCTYPE html>
<html>
<head><title>Broken</title></head>
<body>
<h1>Nurse</h1>
<h2>About</h2>
<h3>Role</h3>
<p>The description was split across
two lines by a template bug</p>
</body>
</html>
";

#[test]
fn test_split_paragraph_is_rejected_with_label() {
    let result = apply_sanity_checks(BROKEN_PAGE, "detail:broken", 1);
    assert_sanity_check(&result, "detail:broken");
    match result {
        Err(BoardError::SanityCheck {
            source: ContentError::OrphanedFragment { line_number, line },
            ..
        }) => {
            assert_eq!(line_number, 9);
            assert_eq!(line, "two lines by a template bug</p>");
        }
        other => panic!("expected orphaned fragment, got {other:?}"),
    }
}

#[test]
fn test_rendered_pages_keep_block_tags_on_one_line() -> Result<(), String> {
    let synth = Synthesizer::new(SiteConfig::default()).map_err(|e| e.to_string())?;
    let html = synth
        .render_detail_page(&rich_job())
        .map_err(|e| e.to_string())?;
    for line in html.lines() {
        for tag in ["p", "li", "h1", "h2", "h3"] {
            if line.contains(&format!("</{tag}>")) {
                assert!(
                    line.contains(&format!("<{tag}>")) || line.contains(&format!("<{tag} ")),
                    "unbalanced line: {line}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_custom_site_name_flows_into_page() -> Result<(), String> {
    let config = SiteConfig::default()
        .with_site_name("Aid Careers")
        .with_base_url("https://aid.example.com/");
    let synth = Synthesizer::new(config).map_err(|e| e.to_string())?;
    let job = thin_job();
    let html = synth.render_detail_page(&job).map_err(|e| e.to_string())?;

    assert!(html.contains("Aid Careers"));
    assert!(html.contains(&format!(
        "<link rel=\"canonical\" href=\"https://aid.example.com/jobs/{}\">",
        job.id
    )));
    Ok(())
}

#[test]
fn test_render_is_deterministic() -> Result<(), String> {
    let synth = Synthesizer::new(SiteConfig::default()).map_err(|e| e.to_string())?;
    let job = rich_job();
    let first = synth.render_detail_page(&job).map_err(|e| e.to_string())?;
    let second = synth.render_detail_page(&job).map_err(|e| e.to_string())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_document_render_is_public() {
    use jobboard_ssr::{Block, Document, Head, Section, Subsection};

    let head = Head {
        title: "Title".to_string(),
        description: "Description".to_string(),
        keywords: Vec::new(),
        canonical_url: "https://jobs.example.org/".to_string(),
        og_type: "website",
        site_name: "Relief Jobs".to_string(),
        structured_data: Vec::new(),
    };
    let doc = Document::new(head, "Heading")
        .intro(Block::text("Intro"))
        .section(Section::new("Part").subsection(Subsection::new("Detail").paragraph("Body")));
    let html = render(&doc);
    assert!(html.contains("<h1>Heading</h1>"));
    assert!(html.contains("<h3>Detail</h3>"));
}

#[test]
fn test_crawler_routing_examples() {
    let crawlers = [
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
        "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)",
        "Twitterbot/1.0",
        "Slackbot-LinkExpanding 1.0 (+https://api.slack.com/robots)",
    ];
    for ua in crawlers {
        assert!(is_bot(ua), "{ua} should be a bot");
    }

    let humans = [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        "",
    ];
    for ua in humans {
        assert!(!is_bot(ua), "{ua} should be human");
    }
}
