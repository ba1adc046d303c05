//! Block to Markdown encoding.
//!
//! Converts a block sequence into a Markdown string so remote documents
//! can re-enter the regular rendering pipeline.

use crate::{Block, RichSpan};

/// Encode blocks as a Markdown document.
#[must_use]
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    let lines: Vec<String> = blocks.iter().map(block_to_markdown).collect();
    let mut markdown = lines.join("\n\n");
    if !markdown.is_empty() {
        markdown.push('\n');
    }
    markdown
}

fn block_to_markdown(block: &Block) -> String {
    match block {
        Block::Heading1 { spans } => format!("# {}", spans_to_markdown(spans)),
        Block::Heading2 { spans } => format!("## {}", spans_to_markdown(spans)),
        Block::Heading3 { spans } => format!("### {}", spans_to_markdown(spans)),
        Block::Paragraph { spans } => spans_to_markdown(spans),
        Block::BulletItem { spans } => format!("- {}", spans_to_markdown(spans)),
        Block::NumberItem { spans } => format!("1. {}", spans_to_markdown(spans)),
        Block::Quote { spans } => format!("> {}", spans_to_markdown(spans)),
        Block::Code { language, spans } => {
            let code: String = spans.iter().map(|s| s.content.as_str()).collect();
            format!(
                "```{}\n{}\n```",
                language.as_deref().unwrap_or_default(),
                code.trim_end_matches('\n')
            )
        }
    }
}

fn spans_to_markdown(spans: &[RichSpan]) -> String {
    spans.iter().map(span_to_markdown).collect()
}

/// Apply annotations in fixed nesting order: code innermost, then bold,
/// then italic, with the link syntax outermost.
fn span_to_markdown(span: &RichSpan) -> String {
    let mut text = span.content.clone();
    if span.code {
        text = format!("`{text}`");
    }
    if span.bold {
        text = format!("**{text}**");
    }
    if span.italic {
        text = format!("*{text}*");
    }
    if let Some(url) = &span.link_url {
        text = format!("[{text}]({url})");
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spans(text: &str) -> Vec<RichSpan> {
        vec![RichSpan::text(text)]
    }

    #[test]
    fn test_heading_levels() {
        let blocks = vec![
            Block::Heading1 { spans: spans("One") },
            Block::Heading2 { spans: spans("Two") },
            Block::Heading3 { spans: spans("Three") },
        ];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "# One\n\n## Two\n\n### Three\n"
        );
    }

    #[test]
    fn test_list_and_quote_prefixes() {
        let blocks = vec![
            Block::BulletItem { spans: spans("bullet") },
            Block::NumberItem { spans: spans("numbered") },
            Block::Quote { spans: spans("wisdom") },
        ];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "- bullet\n\n1. numbered\n\n> wisdom\n"
        );
    }

    #[test]
    fn test_fenced_code_with_language() {
        let blocks = vec![Block::Code {
            language: Some("bash".to_owned()),
            spans: vec![RichSpan::text("npm install\nnpm run dev").code()],
        }];
        assert_eq!(
            blocks_to_markdown(&blocks),
            "```bash\nnpm install\nnpm run dev\n```\n"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        let blocks = vec![Block::Code {
            language: None,
            spans: spans("x = 1"),
        }];
        assert_eq!(blocks_to_markdown(&blocks), "```\nx = 1\n```\n");
    }

    #[test]
    fn test_span_annotation_nesting() {
        let span = RichSpan::text("all").code().bold().italic().link("https://e.com");
        assert_eq!(span_to_markdown(&span), "[***`all`***](https://e.com)");
    }

    #[test]
    fn test_empty_blocks() {
        assert_eq!(blocks_to_markdown(&[]), "");
    }
}
