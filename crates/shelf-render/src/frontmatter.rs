//! Frontmatter parsing.
//!
//! Documents may start with a `---`-fenced YAML preamble supplying a
//! `title` override and `tags`. Tags accept either a YAML sequence or a
//! single string delimited by half-width or full-width commas.

use serde::Deserialize;

/// Parsed frontmatter fields.
#[derive(Debug, Default, Deserialize)]
pub struct Frontmatter {
    /// Title override.
    #[serde(default)]
    pub title: Option<String>,
    /// Tag list or delimited tag string.
    #[serde(default)]
    tags: Option<TagsField>,
}

/// Tags as written in YAML: a sequence or a delimited string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagsField {
    List(Vec<serde_yaml::Value>),
    Text(String),
}

impl Frontmatter {
    /// Resolve tags to a trimmed, non-empty string list.
    ///
    /// Returns `None` when the frontmatter carries no `tags` key at all,
    /// so callers can distinguish "absent" from "empty".
    #[must_use]
    pub fn tags(&self) -> Option<Vec<String>> {
        let field = self.tags.as_ref()?;
        let tags = match field {
            TagsField::List(values) => values.iter().filter_map(coerce_tag).collect(),
            TagsField::Text(text) => split_tags(text),
        };
        Some(tags)
    }
}

/// Coerce a YAML scalar to a tag string; non-scalars are dropped.
fn coerce_tag(value: &serde_yaml::Value) -> Option<String> {
    let tag = match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let tag = tag.trim();
    (!tag.is_empty()).then(|| tag.to_owned())
}

/// Split a tag string on half-width and full-width commas.
fn split_tags(text: &str) -> Vec<String> {
    text.split([',', '，'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split a document into frontmatter and body.
///
/// Frontmatter is a leading `---` line followed by YAML and a closing
/// `---` line. Malformed YAML is treated as an absent preamble for the
/// fields while the body still excludes the fenced block.
#[must_use]
pub fn split(source: &str) -> (Frontmatter, &str) {
    let Some((yaml, body)) = split_raw(source) else {
        return (Frontmatter::default(), source);
    };
    let frontmatter = serde_yaml::from_str(yaml).unwrap_or_default();
    (frontmatter, body)
}

/// Split off the raw YAML block, if the document starts with one.
fn split_raw(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = split("# Title\n\nbody");
        assert!(fm.title.is_none());
        assert!(fm.tags().is_none());
        assert_eq!(body, "# Title\n\nbody");
    }

    #[test]
    fn test_title_and_list_tags() {
        let source = "---\ntitle: Guide\ntags:\n  - rust\n  - notes\n---\n# Heading\n";
        let (fm, body) = split(source);
        assert_eq!(fm.title.as_deref(), Some("Guide"));
        assert_eq!(fm.tags(), Some(vec!["rust".to_owned(), "notes".to_owned()]));
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_mixed_comma_tag_string() {
        let source = "---\ntags: \"a, b，c\"\n---\nbody";
        let (fm, _) = split(source);
        assert_eq!(
            fm.tags(),
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn test_empty_segments_dropped() {
        let source = "---\ntags: \"a,, ,b\"\n---\n";
        let (fm, _) = split(source);
        assert_eq!(fm.tags(), Some(vec!["a".to_owned(), "b".to_owned()]));
    }

    #[test]
    fn test_numeric_tags_coerced() {
        let source = "---\ntags:\n  - 2024\n  - rust\n---\n";
        let (fm, _) = split(source);
        assert_eq!(fm.tags(), Some(vec!["2024".to_owned(), "rust".to_owned()]));
    }

    #[test]
    fn test_unterminated_frontmatter_left_in_body() {
        let source = "---\ntitle: Broken\n# Heading";
        let (fm, body) = split(source);
        assert!(fm.title.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_malformed_yaml_tolerated() {
        let source = "---\ntitle: [unclosed\n---\nbody";
        let (fm, body) = split(source);
        assert!(fm.title.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_frontmatter() {
        let source = "---\r\ntitle: Windows\r\n---\r\nbody";
        let (fm, body) = split(source);
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "body");
    }
}
