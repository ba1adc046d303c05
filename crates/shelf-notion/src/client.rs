//! Notion REST API client.
//!
//! Sync HTTP client for the subset of the Notion API the site needs:
//! block children, page properties, and database queries. Every public
//! method contains failures locally — a missing token or a failed call
//! degrades to `None` or the demo dataset, never an error.

use std::time::Duration;

use serde_json::Value;
use tracing::warn;
use ureq::Agent;

use crate::{Block, NotionConfig, NotionDoc, NotionPage, PageSummary, RichSpan, markdown, mock};

/// Notion API version header value.
const NOTION_VERSION: &str = "2022-06-28";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Error talking to the Notion API.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// Transport or deserialization failure.
    #[error("request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Non-success HTTP status.
    #[error("unexpected response ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Response JSON did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(&'static str),
}

/// Notion API client.
pub struct NotionClient {
    agent: Agent,
    config: NotionConfig,
}

impl NotionClient {
    /// Create a client from injected configuration.
    #[must_use]
    pub fn new(config: NotionConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, config }
    }

    /// Whether a token is configured (live mode).
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token().is_some()
    }

    fn token(&self) -> Option<&str> {
        self.config.token.as_deref().filter(|t| !t.is_empty())
    }

    fn database_id(&self) -> Option<&str> {
        self.config.database_id.as_deref().filter(|d| !d.is_empty())
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Fetch a page and convert it to Markdown.
    ///
    /// Returns `None` when no token is configured or the remote call
    /// fails; callers substitute a placeholder document.
    #[must_use]
    pub fn fetch_doc(&self, page_id: &str) -> Option<NotionDoc> {
        let token = self.token()?;
        match self.try_fetch_doc(token, page_id) {
            Ok(doc) => Some(doc),
            Err(err) => {
                warn!(page_id, error = %err, "Notion document fetch failed");
                None
            }
        }
    }

    /// List database entries for menu population.
    ///
    /// Unconfigured credentials or a failed call yield the fixed demo
    /// summaries so the menu stays populated.
    #[must_use]
    pub fn list_database(&self) -> Vec<PageSummary> {
        let Some((token, database_id)) = self.token().zip(self.database_id()) else {
            return mock::summaries();
        };
        match self.try_list_database(token, database_id) {
            Ok(items) => items,
            Err(err) => {
                warn!(database_id, error = %err, "Notion database query failed");
                mock::summaries()
            }
        }
    }

    /// Fetch a page as raw blocks for direct rendering.
    ///
    /// In mock mode (or after a live failure) the demo pages are
    /// consulted; an unknown id yields `None`.
    #[must_use]
    pub fn get_page(&self, page_id: &str) -> Option<NotionPage> {
        if let Some(token) = self.token() {
            match self.try_get_page(token, page_id) {
                Ok(page) => return Some(page),
                Err(err) => {
                    warn!(page_id, error = %err, "Notion page fetch failed");
                }
            }
        }
        mock::page(page_id)
    }

    fn try_fetch_doc(&self, token: &str, page_id: &str) -> Result<NotionDoc, NotionError> {
        let blocks = self.fetch_blocks(token, page_id)?;
        let (title, tags) = self.fetch_page_properties(token, page_id)?;
        Ok(NotionDoc {
            markdown: markdown::blocks_to_markdown(&blocks),
            title,
            tags,
        })
    }

    fn try_get_page(&self, token: &str, page_id: &str) -> Result<NotionPage, NotionError> {
        let blocks = self.fetch_blocks(token, page_id)?;
        let (title, tags) = self.fetch_page_properties(token, page_id)?;
        Ok(NotionPage {
            id: page_id.to_owned(),
            title,
            tags,
            blocks,
        })
    }

    fn try_list_database(
        &self,
        token: &str,
        database_id: &str,
    ) -> Result<Vec<PageSummary>, NotionError> {
        let url = self.api_url(&format!("databases/{database_id}/query"));
        let value = self.post_json(token, &url, &serde_json::json!({}))?;
        let results = value
            .get("results")
            .and_then(Value::as_array)
            .ok_or(NotionError::Malformed("missing results array"))?;

        Ok(results
            .iter()
            .filter_map(|entry| {
                let id = entry.get("id")?.as_str()?.to_owned();
                let title = title_from_properties(entry.get("properties")?);
                Some(PageSummary { id, title })
            })
            .collect())
    }

    fn fetch_blocks(&self, token: &str, page_id: &str) -> Result<Vec<Block>, NotionError> {
        let url = self.api_url(&format!("blocks/{page_id}/children?page_size=100"));
        let value = self.get_json(token, &url)?;
        let results = value
            .get("results")
            .and_then(Value::as_array)
            .ok_or(NotionError::Malformed("missing results array"))?;

        // Unsupported block kinds are dropped rather than failing the page.
        Ok(results.iter().filter_map(parse_block).collect())
    }

    fn fetch_page_properties(
        &self,
        token: &str,
        page_id: &str,
    ) -> Result<(String, Vec<String>), NotionError> {
        let url = self.api_url(&format!("pages/{page_id}"));
        let value = self.get_json(token, &url)?;
        let properties = value
            .get("properties")
            .ok_or(NotionError::Malformed("missing properties"))?;

        Ok((
            title_from_properties(properties),
            tags_from_properties(properties),
        ))
    }

    fn get_json(&self, token: &str, url: &str) -> Result<Value, NotionError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {token}"))
            .header("Notion-Version", NOTION_VERSION)
            .header("Accept", "application/json")
            .call()?;
        Self::read_body(response)
    }

    fn post_json(&self, token: &str, url: &str, body: &Value) -> Result<Value, NotionError> {
        let response = self
            .agent
            .post(url)
            .header("Authorization", &format!("Bearer {token}"))
            .header("Notion-Version", NOTION_VERSION)
            .header("Accept", "application/json")
            .send_json(body)?;
        Self::read_body(response)
    }

    fn read_body(response: ureq::http::Response<ureq::Body>) -> Result<Value, NotionError> {
        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let text = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(NotionError::Status { status, body: text });
        }

        Ok(body.read_json()?)
    }
}

/// Resolve the page title: `Name`/`title` keys first, then the first
/// `title`-typed property, defaulting to "Untitled".
fn title_from_properties(properties: &Value) -> String {
    let named = properties
        .get("Name")
        .or_else(|| properties.get("title"))
        .filter(|p| is_title_property(p));

    let prop = named.or_else(|| {
        properties
            .as_object()?
            .values()
            .find(|p| is_title_property(p))
    });

    prop.and_then(plain_text_of_title)
        .unwrap_or_else(|| "Untitled".to_owned())
}

fn is_title_property(prop: &Value) -> bool {
    prop.get("type").and_then(Value::as_str) == Some("title")
}

fn plain_text_of_title(prop: &Value) -> Option<String> {
    let parts = prop.get("title")?.as_array()?;
    if parts.is_empty() {
        return None;
    }
    Some(
        parts
            .iter()
            .filter_map(|t| t.get("plain_text").and_then(Value::as_str))
            .collect(),
    )
}

/// Resolve tags from a `tags`/`Tags` multi-select property.
fn tags_from_properties(properties: &Value) -> Vec<String> {
    let prop = properties
        .get("tags")
        .or_else(|| properties.get("Tags"))
        .filter(|p| p.get("type").and_then(Value::as_str) == Some("multi_select"));

    prop.and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse one Notion API block into the canonical model.
fn parse_block(value: &Value) -> Option<Block> {
    let kind = value.get("type")?.as_str()?;
    let payload = value.get(kind)?;
    let spans = parse_spans(payload);

    let block = match kind {
        "heading_1" => Block::Heading1 { spans },
        "heading_2" => Block::Heading2 { spans },
        "heading_3" => Block::Heading3 { spans },
        "paragraph" => Block::Paragraph { spans },
        "bulleted_list_item" => Block::BulletItem { spans },
        "numbered_list_item" => Block::NumberItem { spans },
        "quote" => Block::Quote { spans },
        "code" => Block::Code {
            language: payload
                .get("language")
                .and_then(Value::as_str)
                .filter(|l| !l.is_empty())
                .map(str::to_owned),
            spans,
        },
        _ => return None,
    };
    Some(block)
}

fn parse_spans(payload: &Value) -> Vec<RichSpan> {
    payload
        .get("rich_text")
        .and_then(Value::as_array)
        .map(|spans| spans.iter().filter_map(parse_span).collect())
        .unwrap_or_default()
}

fn parse_span(value: &Value) -> Option<RichSpan> {
    let content = value
        .get("plain_text")
        .or_else(|| value.get("text").and_then(|t| t.get("content")))
        .and_then(Value::as_str)?
        .to_owned();

    let annotations = value.get("annotations");
    let flag = |name: &str| {
        annotations
            .and_then(|a| a.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };

    let link_url = value
        .get("href")
        .or_else(|| {
            value
                .get("text")
                .and_then(|t| t.get("link"))
                .and_then(|l| l.get("url"))
        })
        .and_then(Value::as_str)
        .map(str::to_owned);

    Some(RichSpan {
        content,
        bold: flag("bold"),
        italic: flag("italic"),
        code: flag("code"),
        link_url,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn unconfigured() -> NotionClient {
        NotionClient::new(NotionConfig::default())
    }

    #[test]
    fn test_unconfigured_fetch_doc_is_none() {
        assert!(unconfigured().fetch_doc("demo1").is_none());
    }

    #[test]
    fn test_unconfigured_list_falls_back_to_demo_set() {
        let items = unconfigured().list_database();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "demo1");
        assert_eq!(items[1].id, "demo2");
    }

    #[test]
    fn test_remote_failure_list_falls_back_to_demo_set() {
        // Nothing listens on this port, so the live call fails and the
        // client degrades to the demo summaries instead of erroring.
        let client = NotionClient::new(NotionConfig {
            token: Some("secret".to_owned()),
            database_id: Some("db".to_owned()),
            api_url: "http://127.0.0.1:1".to_owned(),
        });

        let items = client.list_database();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "demo1");
    }

    #[test]
    fn test_unconfigured_get_page_serves_mock() {
        let page = unconfigured().get_page("demo2").unwrap();
        assert_eq!(page.title, "Getting Started — Notion Native");
        assert!(unconfigured().get_page("nope").is_none());
    }

    #[test]
    fn test_empty_token_counts_as_unconfigured() {
        let client = NotionClient::new(NotionConfig {
            token: Some(String::new()),
            database_id: Some(String::new()),
            api_url: "https://api.notion.com".to_owned(),
        });
        assert!(!client.is_configured());
        assert_eq!(client.list_database().len(), 2);
    }

    #[test]
    fn test_parse_block_heading() {
        let value = json!({
            "type": "heading_2",
            "heading_2": {
                "rich_text": [
                    {"plain_text": "Hello", "annotations": {"bold": true}}
                ]
            }
        });
        let block = parse_block(&value).unwrap();
        assert_eq!(block.heading_depth(), Some(2));
        assert_eq!(block.spans()[0].content, "Hello");
        assert!(block.spans()[0].bold);
    }

    #[test]
    fn test_parse_block_code_language() {
        let value = json!({
            "type": "code",
            "code": {
                "language": "rust",
                "rich_text": [{"plain_text": "fn x() {}"}]
            }
        });
        let Some(Block::Code { language, .. }) = parse_block(&value) else {
            panic!("expected code block");
        };
        assert_eq!(language.as_deref(), Some("rust"));
    }

    #[test]
    fn test_parse_block_unsupported_kind_dropped() {
        let value = json!({"type": "table_of_contents", "table_of_contents": {}});
        assert!(parse_block(&value).is_none());
    }

    #[test]
    fn test_parse_span_nested_text_fallback() {
        let value = json!({
            "text": {"content": "linked", "link": {"url": "https://e.com"}}
        });
        let span = parse_span(&value).unwrap();
        assert_eq!(span.content, "linked");
        assert_eq!(span.link_url.as_deref(), Some("https://e.com"));
    }

    #[test]
    fn test_title_from_named_property() {
        let props = json!({
            "Name": {
                "type": "title",
                "title": [{"plain_text": "My "}, {"plain_text": "Page"}]
            }
        });
        assert_eq!(title_from_properties(&props), "My Page");
    }

    #[test]
    fn test_title_from_any_title_typed_property() {
        let props = json!({
            "Custom": {
                "type": "title",
                "title": [{"plain_text": "Found"}]
            },
            "Other": {"type": "rich_text"}
        });
        assert_eq!(title_from_properties(&props), "Found");
    }

    #[test]
    fn test_title_defaults_to_untitled() {
        assert_eq!(title_from_properties(&json!({})), "Untitled");
        let empty = json!({"Name": {"type": "title", "title": []}});
        assert_eq!(title_from_properties(&empty), "Untitled");
    }

    #[test]
    fn test_tags_from_multi_select() {
        let props = json!({
            "Tags": {
                "type": "multi_select",
                "multi_select": [{"name": "a"}, {"name": "b"}]
            }
        });
        assert_eq!(tags_from_properties(&props), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_tags_absent() {
        assert!(tags_from_properties(&json!({})).is_empty());
    }
}
