//! Content directory access for Shelf.
//!
//! This crate owns the filesystem side of the site: walking the content
//! directory into a navigation tree, counting documents per category, and
//! resolving slug paths to source files.
//!
//! # Path Convention
//!
//! Slugs are ordered segment sequences without extensions:
//! - `["guide"]` - `content/guide.md` (or another recognized extension)
//! - `["cs", "algorithms"]` - `content/cs/algorithms.md` or
//!   `content/cs/algorithms/index.md`
//!
//! Hidden entries (leading `.`) never appear in any listing.

mod resolver;
mod scanner;

use std::path::Path;

use serde::Serialize;

pub use resolver::{ResolvedDoc, resolve};
pub use scanner::{count_files, first_leaf, list_categories, list_tree, list_tree_scoped};

/// Recognized source file extensions, in resolution priority order.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["md", "xmd", "txt", "mdx"];

/// How a resolved file should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocFormat {
    /// Markdown (including extended variants).
    Markdown,
    /// Plain text, rendered preformatted.
    PlainText,
}

impl DocFormat {
    /// Map a recognized extension to its format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" | "xmd" | "mdx" => Some(Self::Markdown),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// One node in the navigation tree.
///
/// Children are empty for leaf nodes. A child's slug always extends its
/// parent's slug by one segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label.
    pub label: String,
    /// Slug path segments.
    pub slug: Vec<String>,
    /// Child items (directories before files).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// A top-level content directory with its recursive document count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Directory name, used as the first slug segment.
    pub slug: String,
    /// Display label.
    pub label: String,
    /// Recursive count of recognized documents.
    pub count: usize,
}

/// Error reading the content directory.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Underlying filesystem failure.
    #[error("content directory error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the content directory if it is missing.
///
/// A missing root is treated as an empty site rather than an error.
pub fn ensure_content_dir(root: &Path) -> Result<(), ContentError> {
    if !root.is_dir() {
        std::fs::create_dir_all(root)?;
    }
    Ok(())
}

/// Derive a display label from a file or directory name.
///
/// Strips the last dot suffix and maps `-`/`_` separators to spaces.
#[must_use]
pub fn name_to_label(name: &str) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    stem.replace(['-', '_'], " ")
}
