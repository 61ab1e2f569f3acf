//! The single HTML renderer.
//!
//! Walks a [`Document`] and emits matched tags. Every paragraph, heading and
//! list item is written on one line with its opening and closing tag, and all
//! text is whitespace-collapsed and escaped, so no text node can introduce
//! markup or split an element across lines.

use std::fmt::Write;

use serde_json::Value;

use crate::document::{Block, Document, Head, Inline, Section, Subsection};

/// Render a document to a complete HTML5 string.
pub fn render(doc: &Document) -> String {
    let mut out = String::with_capacity(8 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
    render_head(&mut out, doc.head());
    out.push_str("<body>\n");
    render_nav(&mut out);
    out.push_str("<main>\n");
    line(&mut out, "h1", &text(doc.title()));
    for block in doc.intro_blocks() {
        render_block(&mut out, block);
    }
    for section in doc.sections() {
        render_section(&mut out, section);
    }
    out.push_str("</main>\n");
    render_footer(&mut out, &doc.head().site_name);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_head(out: &mut String, head: &Head) {
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", text(&head.title));
    meta_name(out, "description", &head.description);
    if !head.keywords.is_empty() {
        meta_name(out, "keywords", &head.keywords.join(", "));
    }
    meta_name(out, "robots", "index, follow");
    let _ = writeln!(
        out,
        "<link rel=\"canonical\" href=\"{}\">",
        escape(&head.canonical_url)
    );
    meta_property(out, "og:type", head.og_type);
    meta_property(out, "og:title", &head.title);
    meta_property(out, "og:description", &head.description);
    meta_property(out, "og:url", &head.canonical_url);
    meta_property(out, "og:site_name", &head.site_name);
    for data in &head.structured_data {
        let _ = writeln!(
            out,
            "<script type=\"application/ld+json\">{}</script>",
            json_for_script(data)
        );
    }
    out.push_str("</head>\n");
}

fn meta_name(out: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta name=\"{}\" content=\"{}\">",
        escape(name),
        text(content)
    );
}

fn meta_property(out: &mut String, property: &str, content: &str) {
    let _ = writeln!(
        out,
        "<meta property=\"{}\" content=\"{}\">",
        escape(property),
        text(content)
    );
}

fn render_nav(out: &mut String) {
    out.push_str("<nav>\n<ul>\n");
    line(out, "li", &inline(&Inline::link("/", "Home")));
    line(out, "li", &inline(&Inline::link("/jobs", "All jobs")));
    out.push_str("</ul>\n</nav>\n");
}

fn render_footer(out: &mut String, site_name: &str) {
    out.push_str("<footer>\n");
    line(
        out,
        "p",
        &text(&format!(
            "{site_name} lists vacancies published by humanitarian and development organizations. Always apply through the hiring organization."
        )),
    );
    out.push_str("</footer>\n");
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str("<section>\n");
    line(out, "h2", &text(section.heading()));
    for block in section.blocks() {
        render_block(out, block);
    }
    for subsection in section.subsections() {
        render_subsection(out, subsection);
    }
    out.push_str("</section>\n");
}

fn render_subsection(out: &mut String, subsection: &Subsection) {
    line(out, "h3", &text(subsection.heading()));
    for block in subsection.blocks() {
        render_block(out, block);
    }
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph(inlines) => line(out, "p", &inlines_html(inlines)),
        Block::List(items) => {
            out.push_str("<ul>\n");
            for item in items {
                line(out, "li", &inlines_html(item));
            }
            out.push_str("</ul>\n");
        }
    }
}

fn inlines_html(inlines: &[Inline]) -> String {
    inlines.iter().map(inline).collect::<Vec<_>>().join(" ")
}

fn inline(node: &Inline) -> String {
    match node {
        Inline::Text(t) => text(t),
        Inline::Strong(t) => format!("<strong>{}</strong>", text(t)),
        Inline::Link { href, text: label } => {
            format!("<a href=\"{}\">{}</a>", escape(href), text(label))
        }
    }
}

/// One element on one line.
fn line(out: &mut String, tag: &str, inner_html: &str) {
    let _ = writeln!(out, "<{tag}>{inner_html}</{tag}>");
}

/// Collapse whitespace and escape a text node.
fn text(raw: &str) -> String {
    escape(&collapse_whitespace(raw))
}

/// Collapse every run of whitespace (including newlines) to one space.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize JSON-LD for embedding in a `<script>` element.
///
/// `<`, `>` and `&` become JSON unicode escapes, so the payload can never
/// close the script element or open a tag.
pub fn json_for_script(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
