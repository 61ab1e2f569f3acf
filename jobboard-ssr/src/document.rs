//! Typed document tree.
//!
//! A page is one title (the only H1), optional intro blocks, and a list of
//! sections (H2), each with its own blocks and subsections (H3). Nodes only
//! carry text; tags are produced exclusively by [`crate::render`], so an
//! opening tag can never be emitted without its closer.

use serde_json::Value;

/// Inline text content.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Link { href: String, text: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self::Strong(text.into())
    }

    pub fn link(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Block content inside the intro, a section or a subsection.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    List(Vec<Vec<Inline>>),
}

impl Block {
    /// A paragraph of plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Paragraph(vec![Inline::text(text)])
    }
}

/// An H3 subsection.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsection {
    heading: String,
    blocks: Vec<Block>,
}

impl Subsection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.block(Block::text(text))
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// An H2 section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    heading: String,
    blocks: Vec<Block>,
    subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
            subsections: Vec::new(),
        }
    }

    pub fn paragraph(self, text: impl Into<String>) -> Self {
        self.block(Block::text(text))
    }

    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn subsection(mut self, subsection: Subsection) -> Self {
        self.subsections.push(subsection);
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }
}

/// Everything that goes into `<head>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Head {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical_url: String,
    /// Open Graph object type (`website`, `article`).
    pub og_type: &'static str,
    pub site_name: String,
    /// JSON-LD blocks, one `<script>` each.
    pub structured_data: Vec<Value>,
}

/// A complete page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    head: Head,
    title: String,
    intro: Vec<Block>,
    sections: Vec<Section>,
}

impl Document {
    pub fn new(head: Head, title: impl Into<String>) -> Self {
        Self {
            head,
            title: title.into(),
            intro: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn intro(mut self, block: Block) -> Self {
        self.intro.push(block);
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a section in place.
    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn intro_blocks(&self) -> &[Block] {
        &self.intro
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of H3 subsections across all sections.
    pub fn subsection_count(&self) -> usize {
        self.sections.iter().map(|s| s.subsections.len()).sum()
    }
}
