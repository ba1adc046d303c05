//! Sidebar and anchor navigation helpers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use shelf_content::NavItem;
use shelf_render::Heading;

use crate::NOTION_PREFIX;

/// Characters to percent-encode in a path segment.
///
/// Matches `encodeURIComponent`: alphanumerics and `- _ . ! ~ * ' ( )`
/// pass through.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Link target for a navigation item.
///
/// Notion items use the dedicated `/notion/<id>` route; local items use
/// `/<segments>` with each segment percent-encoded.
#[must_use]
pub fn href_for(item: &NavItem) -> String {
    if item.slug.first().is_some_and(|s| s == NOTION_PREFIX) {
        let id = item.slug.get(1).map(String::as_str).unwrap_or_default();
        return format!("/notion/{id}");
    }

    format!("/{}", encode_slug(&item.slug))
}

/// Percent-encode slug segments and join them with `/`.
#[must_use]
pub fn encode_slug(slug: &[String]) -> String {
    let encoded: Vec<String> = slug
        .iter()
        .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
        .collect();
    encoded.join("/")
}

/// Whether an item is the currently open page.
///
/// Exact, order-sensitive slug sequence equality.
#[must_use]
pub fn is_active(item: &NavItem, current: &[String]) -> bool {
    item.slug == current
}

/// Outline entries for the anchor nav: depths 2-3 only.
///
/// Depth-1 headings are the page title and are not listed; depth-3
/// entries are indented by the consuming view.
#[must_use]
pub fn anchor_outline(headings: &[Heading]) -> Vec<&Heading> {
    headings
        .iter()
        .filter(|h| (2..=3).contains(&h.depth))
        .collect()
}

/// Percent-decode one incoming slug segment.
///
/// A segment that fails to decode (invalid UTF-8 after decoding) is
/// used unmodified rather than aborting the request.
#[must_use]
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| segment.to_owned())
}
