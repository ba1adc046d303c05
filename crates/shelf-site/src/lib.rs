//! Site structure and document orchestration.
//!
//! [`Site`] ties the content scanner, the rendering pipeline, and the
//! Notion adapter together: it assembles the full navigation tree and
//! turns slug paths into rendered documents. Everything is rebuilt per
//! call — the site holds only immutable configuration, so it can be
//! shared freely across concurrent requests.

pub mod nav;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use shelf_content::{Category, ContentError, DocFormat, NavItem, name_to_label};
use shelf_notion::{NotionClient, NotionPage, PageSummary};
use shelf_render::{DocData, SourceKind, render_markdown, render_plain_text};

/// Reserved first slug segment for Notion-backed documents.
pub const NOTION_PREFIX: &str = "notion";

/// Error producing site data.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Content directory failure.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// I/O error reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A resolved, rendered document plus its source provenance.
#[derive(Clone, Debug)]
pub struct SiteDoc {
    /// Rendered document data.
    pub data: DocData,
    /// Source file path for filesystem documents; `None` for Notion.
    pub source_path: Option<PathBuf>,
    /// Source modification time, when known.
    pub modified: Option<SystemTime>,
}

/// The site: content directory plus the Notion adapter.
pub struct Site {
    content_dir: PathBuf,
    notion: NotionClient,
}

impl Site {
    /// Create a site over a content directory.
    #[must_use]
    pub fn new(content_dir: PathBuf, notion: NotionClient) -> Self {
        Self {
            content_dir,
            notion,
        }
    }

    /// The content root.
    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Full navigation tree: the local content tree, with a Notion group
    /// appended when the database lists any pages.
    pub fn navigation(&self) -> Result<Vec<NavItem>, SiteError> {
        let mut items = shelf_content::list_tree(&self.content_dir)?;

        let pages = self.notion.list_database();
        if !pages.is_empty() {
            items.push(notion_group(&pages));
        }
        Ok(items)
    }

    /// Navigation tree scoped to one category (no Notion group).
    pub fn navigation_for_category(&self, category: &str) -> Result<Vec<NavItem>, SiteError> {
        Ok(shelf_content::list_tree_scoped(&self.content_dir, category)?)
    }

    /// Slug of the first document in depth-first order, across the full
    /// navigation tree. `None` iff the tree is empty.
    pub fn first_doc_slug(&self) -> Result<Option<Vec<String>>, SiteError> {
        let items = self.navigation()?;
        Ok(shelf_content::first_leaf(&items).map(<[String]>::to_vec))
    }

    /// First document slug within one category.
    pub fn first_doc_slug_in_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<String>>, SiteError> {
        let items = self.navigation_for_category(category)?;
        Ok(shelf_content::first_leaf(&items).map(<[String]>::to_vec))
    }

    /// Top-level categories with document counts.
    pub fn categories(&self) -> Result<Vec<Category>, SiteError> {
        Ok(shelf_content::list_categories(&self.content_dir)?)
    }

    /// Notion database entries (or the demo set).
    #[must_use]
    pub fn notion_summaries(&self) -> Vec<PageSummary> {
        self.notion.list_database()
    }

    /// A Notion page as raw blocks, for direct block rendering.
    #[must_use]
    pub fn notion_page(&self, page_id: &str) -> Option<NotionPage> {
        self.notion.get_page(page_id)
    }

    /// Resolve and render the document at `slug_parts`.
    ///
    /// A `notion/<id>` slug is delegated to the adapter and rendered
    /// through the Markdown pipeline; when the adapter is unconfigured
    /// or fails, a placeholder document is returned instead of an error.
    /// Filesystem slugs resolve by extension probing; `Ok(None)` means
    /// not found.
    pub fn get_doc(&self, slug_parts: &[String]) -> Result<Option<SiteDoc>, SiteError> {
        if slug_parts.first().is_some_and(|s| s == NOTION_PREFIX) {
            if let Some(page_id) = slug_parts.get(1) {
                return Ok(Some(self.notion_doc(page_id)));
            }
            return Ok(None);
        }

        let Some(resolved) = shelf_content::resolve(&self.content_dir, slug_parts) else {
            return Ok(None);
        };

        let raw = fs::read_to_string(&resolved.path)?;
        let file_name = resolved
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let data = match resolved.format {
            DocFormat::Markdown => render_markdown(&raw, &name_to_label(&file_name), None),
            DocFormat::PlainText => render_plain_text(&raw, &file_name),
        };

        let modified = fs::metadata(&resolved.path)
            .and_then(|m| m.modified())
            .ok();

        Ok(Some(SiteDoc {
            data,
            source_path: Some(resolved.path),
            modified,
        }))
    }

    fn notion_doc(&self, page_id: &str) -> SiteDoc {
        let data = match self.notion.fetch_doc(page_id) {
            Some(doc) => render_markdown(&doc.markdown, &doc.title, Some(doc.tags)),
            None => placeholder_doc(),
        };
        SiteDoc {
            data,
            source_path: None,
            modified: None,
        }
    }
}

/// Navigation group for Notion pages.
fn notion_group(pages: &[PageSummary]) -> NavItem {
    NavItem {
        label: "Notion".to_owned(),
        slug: vec![NOTION_PREFIX.to_owned()],
        children: pages
            .iter()
            .map(|page| NavItem {
                label: page.title.clone(),
                slug: vec![NOTION_PREFIX.to_owned(), page.id.clone()],
                children: Vec::new(),
            })
            .collect(),
    }
}

/// User-visible stand-in when Notion is unconfigured or unreachable.
fn placeholder_doc() -> DocData {
    DocData {
        html: "<div class=\"prose\"><p>Notion is not configured or the page could not \
               be read: set the <code>NOTION_TOKEN</code> environment variable and use \
               a valid page id.</p></div>"
            .to_owned(),
        headings: Vec::new(),
        title: "Notion document".to_owned(),
        tags: Vec::new(),
        source: SourceKind::Markdown,
    }
}
