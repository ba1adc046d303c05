//! Notion content adapter for Shelf.
//!
//! Notion pages reach the site through one canonical block model
//! ([`Block`] sequences of [`RichSpan`]s) with two encoders:
//!
//! - [`markdown::blocks_to_markdown`] turns blocks into a Markdown
//!   string so remote documents can re-enter the regular rendering
//!   pipeline;
//! - [`render::render_blocks`] turns blocks directly into structural
//!   HTML, with heading ids drawn from the same slug scheme as the
//!   Markdown pipeline.
//!
//! The [`NotionClient`] wraps the Notion REST API. It is constructed
//! from an explicit [`NotionConfig`] rather than reading the
//! environment, so live/mock behavior is injectable in tests. Missing
//! credentials or remote failures never escape the adapter: callers get
//! `None` or the built-in demo dataset instead.

mod client;
pub mod markdown;
mod mock;
pub mod render;

use serde::{Deserialize, Serialize};

pub use client::{NotionClient, NotionError};

/// One formatted text run inside a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichSpan {
    /// Text content.
    pub content: String,
    /// Bold annotation.
    #[serde(default)]
    pub bold: bool,
    /// Italic annotation.
    #[serde(default)]
    pub italic: bool,
    /// Inline-code annotation.
    #[serde(default)]
    pub code: bool,
    /// Link target, if the span is a link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl RichSpan {
    /// Create an unannotated text span.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Mark the span bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the span italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Mark the span as inline code.
    #[must_use]
    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }

    /// Attach a link target.
    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }
}

/// One block of a Notion document, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Top-level heading.
    Heading1 {
        /// Heading content.
        spans: Vec<RichSpan>,
    },
    /// Second-level heading.
    Heading2 {
        /// Heading content.
        spans: Vec<RichSpan>,
    },
    /// Third-level heading.
    Heading3 {
        /// Heading content.
        spans: Vec<RichSpan>,
    },
    /// Paragraph.
    Paragraph {
        /// Paragraph content.
        spans: Vec<RichSpan>,
    },
    /// Bulleted list item (rendered as its own one-item list).
    BulletItem {
        /// Item content.
        spans: Vec<RichSpan>,
    },
    /// Numbered list item (rendered as its own one-item list).
    NumberItem {
        /// Item content.
        spans: Vec<RichSpan>,
    },
    /// Block quote.
    Quote {
        /// Quote content.
        spans: Vec<RichSpan>,
    },
    /// Fenced code block.
    Code {
        /// Code language, if declared.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Code content.
        spans: Vec<RichSpan>,
    },
}

impl Block {
    /// Heading depth (1-3) for heading blocks, `None` otherwise.
    #[must_use]
    pub fn heading_depth(&self) -> Option<u8> {
        match self {
            Self::Heading1 { .. } => Some(1),
            Self::Heading2 { .. } => Some(2),
            Self::Heading3 { .. } => Some(3),
            _ => None,
        }
    }

    /// The block's spans.
    #[must_use]
    pub fn spans(&self) -> &[RichSpan] {
        match self {
            Self::Heading1 { spans }
            | Self::Heading2 { spans }
            | Self::Heading3 { spans }
            | Self::Paragraph { spans }
            | Self::BulletItem { spans }
            | Self::NumberItem { spans }
            | Self::Quote { spans }
            | Self::Code { spans, .. } => spans,
        }
    }

    /// Concatenated span text without annotations.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(|s| s.content.as_str()).collect()
    }
}

/// Summary of a database entry for menu population.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Notion page id.
    pub id: String,
    /// Page title.
    pub title: String,
}

/// A full Notion page as raw blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotionPage {
    /// Notion page id.
    pub id: String,
    /// Page title from properties.
    pub title: String,
    /// Tags from the multi-select property.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Block sequence in document order.
    pub blocks: Vec<Block>,
}

/// A Notion page converted to Markdown for the rendering pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotionDoc {
    /// Markdown rendition of the page blocks.
    pub markdown: String,
    /// Page title from properties.
    pub title: String,
    /// Tags from the multi-select property.
    pub tags: Vec<String>,
}

/// Adapter configuration, injected at construction.
#[derive(Clone, Debug)]
pub struct NotionConfig {
    /// API access token. `None` puts the adapter in mock mode.
    pub token: Option<String>,
    /// Database id used for menu listing.
    pub database_id: Option<String>,
    /// API base URL (overridable for tests).
    pub api_url: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            api_url: "https://api.notion.com".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_block_heading_depth() {
        let h2 = Block::Heading2 {
            spans: vec![RichSpan::text("x")],
        };
        let p = Block::Paragraph {
            spans: vec![RichSpan::text("x")],
        };
        assert_eq!(h2.heading_depth(), Some(2));
        assert_eq!(p.heading_depth(), None);
    }

    #[test]
    fn test_block_plain_text_concatenates_spans() {
        let block = Block::Paragraph {
            spans: vec![RichSpan::text("one "), RichSpan::text("two").bold()],
        };
        assert_eq!(block.plain_text(), "one two");
    }

    #[test]
    fn test_block_json_round_trip() {
        let block = Block::Code {
            language: Some("rust".to_owned()),
            spans: vec![RichSpan::text("fn main() {}").code()],
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""kind":"code""#));
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_rich_span_builders() {
        let span = RichSpan::text("x").bold().italic().link("https://example.com");
        assert!(span.bold);
        assert!(span.italic);
        assert!(!span.code);
        assert_eq!(span.link_url.as_deref(), Some("https://example.com"));
    }
}
