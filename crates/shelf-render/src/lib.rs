//! Document rendering pipeline for Shelf.
//!
//! Turns raw Markdown (with optional YAML frontmatter) or plain text into
//! a [`DocData`]: rendered HTML, a heading outline with anchor ids, a
//! resolved title, and tags.
//!
//! # Heading ids
//!
//! Anchor ids are allocated by a per-document [`SlugAllocator`] during the
//! single render pass, so the ids in the returned outline and the ids
//! injected into the HTML cannot diverge. The same allocator type is used
//! by the Notion block renderer so both document sources share one id
//! scheme.
//!
//! # Example
//!
//! ```
//! use shelf_render::render_markdown;
//!
//! let doc = render_markdown("# Hello\n\n## World\n", "fallback", None);
//! assert_eq!(doc.title, "Hello");
//! assert_eq!(doc.headings[1].id, "world");
//! ```

mod frontmatter;
mod renderer;
mod slug;
mod state;

use serde::Serialize;

pub use slug::{SlugAllocator, slugify};
pub use state::escape_html;

/// One heading in a rendered document, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor id, unique within the document.
    pub id: String,
    /// Plain heading text.
    pub text: String,
    /// Heading depth (1 = `#`).
    pub depth: u8,
}

/// Where a document's content came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Rendered from Markdown.
    Markdown,
    /// Escaped plain text in a preformatted block.
    PlainText,
}

/// A fully rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocData {
    /// Rendered HTML body.
    pub html: String,
    /// Heading outline in document order.
    pub headings: Vec<Heading>,
    /// Resolved title.
    pub title: String,
    /// Resolved tags (empty when none were supplied).
    pub tags: Vec<String>,
    /// Content source kind.
    pub source: SourceKind,
}

/// Render a Markdown document.
///
/// Splits frontmatter, renders the body as GitHub-flavored Markdown, and
/// resolves title and tags:
/// - title: frontmatter `title`, else the first depth-1 heading, else
///   `fallback_title`;
/// - tags: frontmatter `tags`, else `initial_tags` (used for externally
///   sourced documents whose tags come from remote metadata).
#[must_use]
pub fn render_markdown(
    source: &str,
    fallback_title: &str,
    initial_tags: Option<Vec<String>>,
) -> DocData {
    let (fm, body) = frontmatter::split(source);
    let (html, headings) = renderer::DocRenderer::new().render(body);

    let title = fm
        .title
        .clone()
        .or_else(|| {
            headings
                .iter()
                .find(|h| h.depth == 1)
                .map(|h| h.text.clone())
        })
        .unwrap_or_else(|| fallback_title.to_owned());

    let tags = fm.tags().or(initial_tags).unwrap_or_default();

    DocData {
        html,
        headings,
        title,
        tags,
        source: SourceKind::Markdown,
    }
}

/// Render a plain-text document.
///
/// The content is HTML-escaped and wrapped in a preformatted block; no
/// headings or tags are derived and the title is the file name.
#[must_use]
pub fn render_plain_text(raw: &str, file_name: &str) -> DocData {
    DocData {
        html: format!(r#"<pre class="plain-text">{}</pre>"#, escape_html(raw)),
        headings: Vec::new(),
        title: file_name.to_owned(),
        tags: Vec::new(),
        source: SourceKind::PlainText,
    }
}
