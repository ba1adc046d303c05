//! Heading id allocation.
//!
//! Anchor ids must agree between the heading outline returned to the
//! frontend and the `id` attributes injected into the rendered HTML.
//! A single [`SlugAllocator`] instance per document guarantees this:
//! both consumers draw ids from the same collision counters.

use std::collections::HashMap;

/// Allocates unique anchor ids within one document.
///
/// The first heading with a given text receives the bare slug; later
/// headings with the same text receive `-1`, `-2`, ... suffixes.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    seen: HashMap<String, usize>,
}

impl SlugAllocator {
    /// Create an allocator with no recorded slugs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `text`.
    pub fn allocate(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

/// Convert heading text to a GitHub-style slug.
///
/// Lowercases, maps whitespace to hyphens, keeps alphanumerics (including
/// non-ASCII word characters), hyphens and underscores, and drops all
/// other punctuation.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() {
            slug.push('-');
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Section Title"), "section-title");
    }

    #[test]
    fn test_slugify_punctuation_dropped() {
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("Install npm!"), "install-npm");
    }

    #[test]
    fn test_slugify_keeps_hyphens_and_underscores() {
        assert_eq!(slugify("pre-existing_name"), "pre-existing_name");
    }

    #[test]
    fn test_slugify_unicode_preserved() {
        assert_eq!(slugify("数据结构"), "数据结构");
    }

    #[test]
    fn test_slugify_trims_surrounding_whitespace() {
        assert_eq!(slugify("  Padded  Title "), "padded--title");
    }

    #[test]
    fn test_allocator_unique_ids() {
        let mut alloc = SlugAllocator::new();
        assert_eq!(alloc.allocate("FAQ"), "faq");
        assert_eq!(alloc.allocate("FAQ"), "faq-1");
        assert_eq!(alloc.allocate("FAQ"), "faq-2");
    }

    #[test]
    fn test_allocator_independent_bases() {
        let mut alloc = SlugAllocator::new();
        assert_eq!(alloc.allocate("Setup"), "setup");
        assert_eq!(alloc.allocate("Usage"), "usage");
        assert_eq!(alloc.allocate("Setup"), "setup-1");
    }
}
