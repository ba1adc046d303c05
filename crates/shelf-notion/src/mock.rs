//! Built-in demo dataset.
//!
//! Served whenever the adapter is unconfigured or the remote call
//! fails, so menus and demo deployments stay populated offline.

use crate::{Block, NotionPage, PageSummary, RichSpan};

/// Fixed summaries for the demo pages.
pub(crate) fn summaries() -> Vec<PageSummary> {
    vec![
        PageSummary {
            id: "demo1".to_owned(),
            title: "Data Structures Course Summary (Notion native)".to_owned(),
        },
        PageSummary {
            id: "demo2".to_owned(),
            title: "Getting Started — Notion Native".to_owned(),
        },
    ]
}

/// Look up a demo page by id.
pub(crate) fn page(id: &str) -> Option<NotionPage> {
    match id {
        "demo1" => Some(demo1()),
        "demo2" => Some(demo2()),
        _ => None,
    }
}

fn demo1() -> NotionPage {
    NotionPage {
        id: "demo1".to_owned(),
        title: "Data Structures Course Summary (Notion native)".to_owned(),
        tags: vec![
            "algorithms".to_owned(),
            "data-structures".to_owned(),
            "lecture-notes".to_owned(),
        ],
        blocks: vec![
            Block::Heading1 {
                spans: vec![RichSpan::text("Course overview")],
            },
            Block::Paragraph {
                spans: vec![RichSpan::text(
                    "This page is demo data in the native block format, rendered \
                     block by block without a Markdown detour.",
                )],
            },
            Block::Heading2 {
                spans: vec![RichSpan::text("Lecture notes")],
            },
            Block::BulletItem {
                spans: vec![RichSpan::text("Opening and study method (00:22-01:15)").bold()],
            },
            Block::BulletItem {
                spans: vec![RichSpan::text("Data structure fundamentals (01:15-05:56)")],
            },
            Block::BulletItem {
                spans: vec![RichSpan::text("Core concepts in depth (06:06-12:12)")],
            },
            Block::Code {
                language: Some("ts".to_owned()),
                spans: vec![
                    RichSpan::text("import { render } from 'notion';\nconsole.log('hello notion');")
                        .code(),
                ],
            },
            Block::Quote {
                spans: vec![RichSpan::text(
                    "Mastering the basics is the starting point; data structures \
                     and algorithms are the language of computing.",
                )],
            },
            Block::Heading3 {
                spans: vec![RichSpan::text("Simplified taxonomy")],
            },
            Block::NumberItem {
                spans: vec![RichSpan::text("Linear structures: arrays, lists, queues, stacks")],
            },
            Block::NumberItem {
                spans: vec![RichSpan::text(
                    "Storage layouts: sequential, linked, indexed, hashed",
                )],
            },
        ],
    }
}

fn demo2() -> NotionPage {
    NotionPage {
        id: "demo2".to_owned(),
        title: "Getting Started — Notion Native".to_owned(),
        tags: vec!["guide".to_owned(), "setup".to_owned()],
        blocks: vec![
            Block::Heading1 {
                spans: vec![RichSpan::text("Getting Started")],
            },
            Block::Paragraph {
                spans: vec![
                    RichSpan::text("Install dependencies and run the "),
                    RichSpan::text("dev server").italic(),
                    RichSpan::text("."),
                ],
            },
            Block::Code {
                language: Some("bash".to_owned()),
                spans: vec![RichSpan::text("npm install\nnpm run dev").code()],
            },
            Block::Heading2 {
                spans: vec![RichSpan::text("Next Steps")],
            },
            Block::BulletItem {
                spans: vec![RichSpan::text("Configure environment variables")],
            },
            Block::BulletItem {
                spans: vec![
                    RichSpan::text("Add content and explore the "),
                    RichSpan::text("docs").link("https://developers.notion.com"),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fixed_summary_ids() {
        let items = summaries();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "demo1");
        assert_eq!(items[1].id, "demo2");
    }

    #[test]
    fn test_demo_pages_resolve() {
        assert!(page("demo1").is_some());
        assert!(page("demo2").is_some());
        assert!(page("unknown").is_none());
    }

    #[test]
    fn test_demo1_exercises_every_block_kind() {
        let blocks = page("demo1").unwrap().blocks;
        assert!(blocks.iter().any(|b| matches!(b, Block::Heading1 { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Heading2 { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Heading3 { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Paragraph { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::BulletItem { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::NumberItem { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Quote { .. })));
        assert!(blocks.iter().any(|b| matches!(b, Block::Code { .. })));
    }
}
