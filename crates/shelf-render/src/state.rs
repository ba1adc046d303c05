//! Renderer state helpers.

use pulldown_cmark::Alignment;

use crate::Heading;
use crate::slug::SlugAllocator;

/// Escape text for HTML output.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Buffers content of the heading currently being rendered.
///
/// While a heading is open, text events accumulate in two parallel
/// buffers: plain text (for the outline and id allocation) and rendered
/// inline HTML (for the emitted element). The id is allocated once at
/// heading end from the shared [`SlugAllocator`], which keeps the
/// outline and the HTML in agreement.
#[derive(Default)]
pub(crate) struct HeadingState {
    depth: Option<u8>,
    text: String,
    html: String,
}

impl HeadingState {
    pub(crate) fn start(&mut self, depth: u8) {
        self.depth = Some(depth);
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// Close the heading: allocate its id and return the data needed to
    /// emit the element.
    pub(crate) fn complete(&mut self, slugs: &mut SlugAllocator) -> Option<(Heading, String)> {
        let depth = self.depth.take()?;
        let text = self.text.trim().to_owned();
        let id = slugs.allocate(&text);
        let html = self.html.trim().to_owned();
        Some((Heading { id, text, depth }, html))
    }
}

/// Tracks table rendering context.
#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell's alignment.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// Collects image alt text between image start and end events.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;"
        );
    }

    #[test]
    fn test_heading_state_allocates_from_shared_slugs() {
        let mut slugs = SlugAllocator::new();
        let mut state = HeadingState::default();

        state.start(2);
        state.push_text("FAQ");
        state.push_html("FAQ");
        let (first, _) = state.complete(&mut slugs).unwrap();

        state.start(2);
        state.push_text("FAQ");
        state.push_html("FAQ");
        let (second, _) = state.complete(&mut slugs).unwrap();

        assert_eq!(first.id, "faq");
        assert_eq!(second.id, "faq-1");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_alignment_styles() {
        let mut table = TableState::default();
        table.start(vec![Alignment::Left, Alignment::None, Alignment::Right]);
        assert_eq!(
            table.current_alignment_style(),
            r#" style="text-align: left""#
        );
        table.next_cell();
        assert_eq!(table.current_alignment_style(), "");
        table.next_cell();
        assert_eq!(
            table.current_alignment_style(),
            r#" style="text-align: right""#
        );
    }
}
