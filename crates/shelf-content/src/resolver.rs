//! Slug path to source file resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{DocFormat, SUPPORTED_EXTENSIONS, ensure_content_dir};

/// A resolved document source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDoc {
    /// Absolute or root-relative path to the source file.
    pub path: PathBuf,
    /// Render format derived from the extension.
    pub format: DocFormat,
}

/// Resolve slug segments to a source file under `root`.
///
/// Probes `<path>.<ext>` for each recognized extension in priority
/// order; when none matches and the joined path is a directory, probes
/// `<path>/index.<ext>` in the same order. Returns `None` when nothing
/// matches or a segment would escape the content root.
#[must_use]
pub fn resolve(root: &Path, slug_parts: &[String]) -> Option<ResolvedDoc> {
    if slug_parts.is_empty() || !slug_parts.iter().all(|s| is_safe_segment(s)) {
        return None;
    }
    ensure_content_dir(root).ok()?;

    let mut base = root.to_path_buf();
    for part in slug_parts {
        base.push(part);
    }

    for ext in SUPPORTED_EXTENSIONS {
        let candidate = with_appended_extension(&base, ext);
        if candidate.is_file() {
            return Some(ResolvedDoc {
                path: candidate,
                format: DocFormat::from_extension(ext)?,
            });
        }
    }

    if base.is_dir() {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = base.join(format!("index.{ext}"));
            if candidate.is_file() {
                return Some(ResolvedDoc {
                    path: candidate,
                    format: DocFormat::from_extension(ext)?,
                });
            }
        }
    }

    None
}

/// Append `.<ext>` without clobbering dots already in the final segment.
fn with_appended_extension(base: &Path, ext: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_os_string();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// Reject segments that would traverse outside the content root.
fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}
