//! Block to HTML rendering.
//!
//! Pure structural-markup encoder for block sequences. Heading blocks
//! consume anchor ids from a caller-provided list in order; the list
//! must come from [`heading_ids_for`] over the same blocks so anchors
//! agree with the side navigation.

use std::fmt::Write;

use shelf_render::{SlugAllocator, escape_html};

use crate::{Block, RichSpan};

/// Allocate anchor ids for the heading blocks, in document order.
///
/// Uses the same [`SlugAllocator`] as the Markdown pipeline, so a page
/// produces identical anchors whether it is rendered from blocks or
/// from its Markdown conversion.
#[must_use]
pub fn heading_ids_for(blocks: &[Block]) -> Vec<String> {
    let mut slugs = SlugAllocator::new();
    blocks
        .iter()
        .filter(|b| b.heading_depth().is_some())
        .map(|b| slugs.allocate(&b.plain_text()))
        .collect()
}

/// Render blocks to HTML, assigning heading ids from `heading_ids`.
#[must_use]
pub fn render_blocks(blocks: &[Block], heading_ids: &[String]) -> String {
    let mut out = String::with_capacity(1024);
    let mut cursor = 0usize;

    for block in blocks {
        if let Some(depth) = block.heading_depth() {
            let id_attr = heading_ids
                .get(cursor)
                .map(|id| format!(r#" id="{}""#, escape_html(id)))
                .unwrap_or_default();
            cursor += 1;
            write!(
                out,
                "<h{depth}{id_attr}>{}</h{depth}>",
                spans_to_html(block.spans())
            )
            .unwrap();
            continue;
        }

        match block {
            Block::Paragraph { spans } => {
                write!(out, "<p>{}</p>", spans_to_html(spans)).unwrap();
            }
            // Each list block is an independent one-item list; adjacent
            // items of the same kind are not merged.
            Block::BulletItem { spans } => {
                write!(out, "<ul><li>{}</li></ul>", spans_to_html(spans)).unwrap();
            }
            Block::NumberItem { spans } => {
                write!(out, "<ol><li>{}</li></ol>", spans_to_html(spans)).unwrap();
            }
            Block::Quote { spans } => {
                write!(out, "<blockquote>{}</blockquote>", spans_to_html(spans)).unwrap();
            }
            Block::Code { language, spans } => {
                let code: String = spans.iter().map(|s| s.content.as_str()).collect();
                match language {
                    Some(lang) => write!(
                        out,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(lang),
                        escape_html(&code)
                    )
                    .unwrap(),
                    None => {
                        write!(out, "<pre><code>{}</code></pre>", escape_html(&code)).unwrap();
                    }
                }
            }
            // Headings were emitted above.
            Block::Heading1 { .. } | Block::Heading2 { .. } | Block::Heading3 { .. } => {}
        }
    }

    out
}

fn spans_to_html(spans: &[RichSpan]) -> String {
    spans.iter().map(span_to_html).collect()
}

/// Apply annotations in fixed nesting order: code innermost, then bold,
/// then italic, with the link element outermost.
fn span_to_html(span: &RichSpan) -> String {
    let mut html = escape_html(&span.content);
    if span.code {
        html = format!("<code>{html}</code>");
    }
    if span.bold {
        html = format!("<strong>{html}</strong>");
    }
    if span.italic {
        html = format!("<em>{html}</em>");
    }
    if let Some(url) = &span.link_url {
        html = format!(r#"<a href="{}">{html}</a>"#, escape_html(url));
    }
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn heading2(text: &str) -> Block {
        Block::Heading2 {
            spans: vec![RichSpan::text(text)],
        }
    }

    #[test]
    fn test_heading_ids_consumed_in_order() {
        let blocks = vec![
            heading2("Alpha"),
            heading2("Beta"),
            Block::Paragraph {
                spans: vec![RichSpan::text("between")],
            },
            heading2("Gamma"),
        ];
        let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| (*s).to_owned()).collect();

        let html = render_blocks(&blocks, &ids);

        assert!(html.contains(r#"<h2 id="a">Alpha</h2>"#));
        assert!(html.contains(r#"<h2 id="b">Beta</h2>"#));
        // Third heading-kind block takes the third id even with a
        // non-heading block in between.
        assert!(html.contains(r#"<h2 id="c">Gamma</h2>"#));
    }

    #[test]
    fn test_heading_without_remaining_id_has_no_attr() {
        let blocks = vec![heading2("Only")];
        let html = render_blocks(&blocks, &[]);
        assert_eq!(html, "<h2>Only</h2>");
    }

    #[test]
    fn test_heading_ids_for_matches_render_order() {
        let blocks = vec![
            Block::Heading1 {
                spans: vec![RichSpan::text("Intro")],
            },
            heading2("Setup"),
            heading2("Setup"),
        ];

        let ids = heading_ids_for(&blocks);
        assert_eq!(ids, vec!["intro", "setup", "setup-1"]);

        let html = render_blocks(&blocks, &ids);
        assert!(html.contains(r#"<h1 id="intro">"#));
        assert!(html.contains(r#"<h2 id="setup">"#));
        assert!(html.contains(r#"<h2 id="setup-1">"#));
    }

    #[test]
    fn test_one_item_lists_not_merged() {
        let blocks = vec![
            Block::BulletItem {
                spans: vec![RichSpan::text("one")],
            },
            Block::BulletItem {
                spans: vec![RichSpan::text("two")],
            },
        ];
        let html = render_blocks(&blocks, &[]);
        assert_eq!(html, "<ul><li>one</li></ul><ul><li>two</li></ul>");
    }

    #[test]
    fn test_span_nesting_order() {
        let span = RichSpan::text("x").code().bold().italic().link("https://e.com");
        assert_eq!(
            span_to_html(&span),
            r#"<a href="https://e.com"><em><strong><code>x</code></strong></em></a>"#
        );
    }

    #[test]
    fn test_quote_and_code() {
        let blocks = vec![
            Block::Quote {
                spans: vec![RichSpan::text("deep thought")],
            },
            Block::Code {
                language: Some("rust".to_owned()),
                spans: vec![RichSpan::text("fn x() -> i32 { 1 < 2 }")],
            },
        ];
        let html = render_blocks(&blocks, &[]);
        assert!(html.contains("<blockquote>deep thought</blockquote>"));
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_content_escaped() {
        let blocks = vec![Block::Paragraph {
            spans: vec![RichSpan::text("<script>")],
        }];
        assert_eq!(
            render_blocks(&blocks, &[]),
            "<p>&lt;script&gt;</p>"
        );
    }
}
