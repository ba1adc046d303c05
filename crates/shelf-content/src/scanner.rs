//! Navigation tree building by filesystem walking.
//!
//! The scanner walks the content directory recursively and produces the
//! [`NavItem`] tree consumed by the sidebar: directories before files,
//! each group ordered by label, hidden entries skipped. Unreadable
//! entries are silently dropped; only a failure to read the root
//! directory surfaces as an error.

use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::{Category, ContentError, NavItem, SUPPORTED_EXTENSIONS, ensure_content_dir, name_to_label};

/// Build the navigation tree for the whole content directory.
///
/// A missing root is created lazily and yields an empty tree.
pub fn list_tree(root: &Path) -> Result<Vec<NavItem>, ContentError> {
    ensure_content_dir(root)?;
    walk(root, &[])
}

/// Build the navigation tree for one top-level category.
///
/// Slugs in the returned tree are prefixed with the category segment.
/// A category that does not exist (or is not a directory) yields an
/// empty tree.
pub fn list_tree_scoped(root: &Path, category: &str) -> Result<Vec<NavItem>, ContentError> {
    ensure_content_dir(root)?;
    let base = root.join(category);
    if !base.is_dir() {
        return Ok(Vec::new());
    }
    walk(&base, &[category.to_owned()])
}

/// Recursive walk producing one level of the tree.
fn walk(dir: &Path, base_slug: &[String]) -> Result<Vec<NavItem>, ContentError> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            let mut slug = base_slug.to_vec();
            slug.push(name.clone());
            let children = walk(&entry.path(), &slug)?;
            dirs.push(NavItem {
                label: name_to_label(&name),
                slug,
                children,
            });
        } else {
            let Some((stem, ext)) = name.rsplit_once('.') else {
                continue;
            };
            if !SUPPORTED_EXTENSIONS.contains(&ext) {
                continue;
            }
            let mut slug = base_slug.to_vec();
            slug.push(stem.to_owned());
            files.push(NavItem {
                label: name_to_label(&name),
                slug,
                children: Vec::new(),
            });
        }
    }

    sort_by_label(&mut dirs);
    sort_by_label(&mut files);
    dirs.append(&mut files);
    Ok(dirs)
}

/// Order items by label: NFKC-normalized, case-insensitive, with raw
/// label as tie-breaker for determinism.
fn sort_by_label(items: &mut [NavItem]) {
    items.sort_by(|a, b| {
        collation_key(&a.label)
            .cmp(&collation_key(&b.label))
            .then_with(|| a.label.cmp(&b.label))
    });
}

fn collation_key(label: &str) -> String {
    label.nfkc().collect::<String>().to_lowercase()
}

/// First leaf slug in depth-first, left-to-right order.
///
/// Returns `None` iff the tree is empty. An item with no children is a
/// leaf, including an empty directory.
#[must_use]
pub fn first_leaf(items: &[NavItem]) -> Option<&[String]> {
    for item in items {
        if item.children.is_empty() {
            return Some(&item.slug);
        }
        if let Some(found) = first_leaf(&item.children) {
            return Some(found);
        }
    }
    None
}

/// Recursively count recognized documents under `dir`.
///
/// Hidden entries are skipped; unreadable directories count as zero.
#[must_use]
pub fn count_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut count = 0;
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            count += count_files(&entry.path());
        } else if name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| SUPPORTED_EXTENSIONS.contains(&ext))
        {
            count += 1;
        }
    }
    count
}

/// List top-level categories with recursive document counts.
pub fn list_categories(root: &Path) -> Result<Vec<Category>, ContentError> {
    ensure_content_dir(root)?;

    let mut categories = Vec::new();
    for entry in fs::read_dir(root)? {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        categories.push(Category {
            label: name_to_label(&name),
            count: count_files(&entry.path()),
            slug: name,
        });
    }

    categories.sort_by(|a, b| {
        collation_key(&a.label)
            .cmp(&collation_key(&b.label))
            .then_with(|| a.label.cmp(&b.label))
    });
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_empty_tree_for_missing_root() {
        let temp = create_test_dir();
        let root = temp.path().join("content");

        let tree = list_tree(&root).unwrap();

        assert!(tree.is_empty());
        // Root is created lazily.
        assert!(root.is_dir());
    }

    #[test]
    fn test_directories_before_files() {
        let temp = create_test_dir();
        fs::write(temp.path().join("aaa.md"), "# A").unwrap();
        fs::create_dir(temp.path().join("zzz")).unwrap();
        fs::write(temp.path().join("zzz").join("note.md"), "# N").unwrap();

        let tree = list_tree(temp.path()).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].label, "zzz");
        assert!(!tree[0].children.is_empty());
        assert_eq!(tree[1].label, "aaa");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_groups_sorted_by_label() {
        let temp = create_test_dir();
        fs::write(temp.path().join("Banana.md"), "").unwrap();
        fs::write(temp.path().join("apple.md"), "").unwrap();
        fs::write(temp.path().join("cherry.md"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();
        let labels: Vec<_> = tree.iter().map(|i| i.label.as_str()).collect();

        // Case-insensitive ordering.
        assert_eq!(labels, vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = create_test_dir();
        fs::write(temp.path().join(".hidden.md"), "").unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("visible.md"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].label, "visible");
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let temp = create_test_dir();
        fs::write(temp.path().join("notes.md"), "").unwrap();
        fs::write(temp.path().join("photo.png"), "").unwrap();
        fs::write(temp.path().join("noext"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].slug, vec!["notes".to_owned()]);
    }

    #[test]
    fn test_slugs_extend_parent() {
        let temp = create_test_dir();
        let sub = temp.path().join("cs").join("algo");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("sorting.md"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();

        assert_eq!(tree[0].slug, vec!["cs".to_owned()]);
        assert_eq!(tree[0].children[0].slug, vec!["cs".to_owned(), "algo".to_owned()]);
        assert_eq!(
            tree[0].children[0].children[0].slug,
            vec!["cs".to_owned(), "algo".to_owned(), "sorting".to_owned()]
        );
    }

    #[test]
    fn test_file_label_strips_extension_and_separators() {
        let temp = create_test_dir();
        fs::write(temp.path().join("getting-started_guide.md"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();

        assert_eq!(tree[0].label, "getting started guide");
        assert_eq!(tree[0].slug, vec!["getting-started_guide".to_owned()]);
    }

    #[test]
    fn test_first_leaf_depth_first() {
        let temp = create_test_dir();
        let sub = temp.path().join("a-dir");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("deep.md"), "").unwrap();
        fs::write(temp.path().join("top.md"), "").unwrap();

        let tree = list_tree(temp.path()).unwrap();
        let leaf = first_leaf(&tree).unwrap();

        // The directory sorts first, so its leaf wins over the root file.
        assert_eq!(leaf, ["a-dir".to_owned(), "deep".to_owned()]);
    }

    #[test]
    fn test_first_leaf_empty_tree() {
        assert!(first_leaf(&[]).is_none());
    }

    #[test]
    fn test_count_files_recursive() {
        let temp = create_test_dir();
        fs::write(temp.path().join("a.md"), "").unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("skip.png"), "").unwrap();
        fs::write(temp.path().join(".hidden.md"), "").unwrap();
        let sub = temp.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("c.mdx"), "").unwrap();

        assert_eq!(count_files(temp.path()), 3);
    }

    #[test]
    fn test_list_categories() {
        let temp = create_test_dir();
        let cs = temp.path().join("cs");
        fs::create_dir(&cs).unwrap();
        fs::write(cs.join("one.md"), "").unwrap();
        fs::write(cs.join("two.md"), "").unwrap();
        let art = temp.path().join("art-notes");
        fs::create_dir(&art).unwrap();
        fs::write(art.join("intro.md"), "").unwrap();
        // Top-level files are not categories.
        fs::write(temp.path().join("readme.md"), "").unwrap();

        let categories = list_categories(temp.path()).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].slug, "art-notes");
        assert_eq!(categories[0].label, "art notes");
        assert_eq!(categories[0].count, 1);
        assert_eq!(categories[1].slug, "cs");
        assert_eq!(categories[1].count, 2);
    }

    #[test]
    fn test_scoped_tree_prefixes_category() {
        let temp = create_test_dir();
        let cs = temp.path().join("cs");
        fs::create_dir(&cs).unwrap();
        fs::write(cs.join("intro.md"), "").unwrap();

        let tree = list_tree_scoped(temp.path(), "cs").unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].slug, vec!["cs".to_owned(), "intro".to_owned()]);
    }

    #[test]
    fn test_scoped_tree_missing_category_is_empty() {
        let temp = create_test_dir();

        let tree = list_tree_scoped(temp.path(), "nope").unwrap();

        assert!(tree.is_empty());
    }
}
