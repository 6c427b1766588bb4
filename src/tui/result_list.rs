use crate::search::SearchResult;
use crate::tui::theme::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Rows taken by the header (title bar plus a spacer)
pub const HEADER_HEIGHT: u16 = 2;
/// Rows taken by the footer (spacer plus key hints)
pub const FOOTER_HEIGHT: u16 = 2;

// Two border columns plus one column of padding on each side.
const BOX_CHROME: usize = 4;
const MIN_BOX_WIDTH: usize = 14;

/// Scrollable list of search results with a selection cursor.
///
/// The whole list is rendered into one document of lines; the viewport is a
/// window into that document which follows the cursor with minimal scrolling.
pub struct ResultList {
    results: Vec<SearchResult>,
    theme: Theme,
    max_item_width: u16,
    cursor: usize,
    scroll_offset: usize,
    viewport_height: usize,
    width: u16,
    ready: bool,
    document: Vec<Line<'static>>,
    item_heights: Vec<usize>,
}

impl ResultList {
    pub fn new(results: Vec<SearchResult>, theme: Theme, max_item_width: u16) -> Self {
        Self {
            results,
            theme,
            max_item_width,
            cursor: 0,
            scroll_offset: 0,
            viewport_height: 0,
            width: 0,
            ready: false,
            document: Vec::new(),
            item_heights: Vec::new(),
        }
    }

    /// Apply a new terminal size: recompute the viewport, re-render everything.
    ///
    /// The first call marks the list ready.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.viewport_height = height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT) as usize;
        self.ready = true;

        self.rebuild();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.sync_viewport();
    }

    /// Move the cursor by `delta`, clamped to the list bounds (no wraparound).
    ///
    /// Returns whether the cursor actually moved.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        if self.results.is_empty() {
            return false;
        }

        let last = self.results.len() - 1;
        let target = self.cursor.saturating_add_signed(delta).min(last);
        if target == self.cursor {
            return false;
        }

        self.cursor = target;
        self.rebuild();
        self.sync_viewport();
        true
    }

    /// Jump to the first result
    pub fn select_first(&mut self) -> bool {
        self.move_cursor(-(self.cursor as isize))
    }

    /// Jump to the last result
    pub fn select_last(&mut self) -> bool {
        let last = self.results.len().saturating_sub(1);
        self.move_cursor(last as isize - self.cursor as isize)
    }

    /// Bring the selected item fully into view, scrolling as little as possible
    pub fn sync_viewport(&mut self) {
        if !self.ready || self.results.is_empty() {
            return;
        }
        self.scroll_offset = scroll_to_item(
            &self.item_heights,
            self.cursor,
            self.scroll_offset,
            self.viewport_height,
        );
    }

    /// Pan the viewport without moving the cursor (mouse wheel, page keys)
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    /// Currently selected result
    pub fn selected(&self) -> Option<&SearchResult> {
        self.results.get(self.cursor)
    }

    /// Lines of the document that fall inside the viewport
    pub fn visible_lines(&self) -> &[Line<'static>] {
        let start = self.scroll_offset.min(self.document.len());
        let end = (start + self.viewport_height).min(self.document.len());
        &self.document[start..end]
    }

    /// The full rendered document
    pub fn document(&self) -> &[Line<'static>] {
        &self.document
    }

    pub fn item_heights(&self) -> &[usize] {
        &self.item_heights
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn max_scroll(&self) -> usize {
        self.document.len().saturating_sub(self.viewport_height)
    }

    fn rebuild(&mut self) {
        self.document.clear();
        self.item_heights.clear();

        for (index, result) in self.results.iter().enumerate() {
            let block = render_item(
                result,
                index == self.cursor,
                self.width,
                self.max_item_width,
                &self.theme,
            );
            self.item_heights.push(block.len());
            self.document.extend(block);
        }
    }
}

/// New viewport offset that shows item `cursor` completely.
///
/// Scrolls up to the item's first line when it starts above the viewport, or
/// down just far enough that its last line is the viewport's last line.
pub fn scroll_to_item(heights: &[usize], cursor: usize, offset: usize, viewport_height: usize) -> usize {
    let lines_before: usize = heights.iter().take(cursor).sum();
    let current = heights.get(cursor).copied().unwrap_or(0);

    if lines_before < offset {
        lines_before
    } else if lines_before + current > offset + viewport_height {
        lines_before + current - viewport_height
    } else {
        offset
    }
}

/// Outer width of a result box for a terminal `width` columns wide
pub fn item_width(width: u16, max_item_width: u16) -> usize {
    (width as usize)
        .saturating_sub(4)
        .min(max_item_width as usize)
        .max(MIN_BOX_WIDTH)
}

/// Render one result as a rounded box followed by a blank margin line.
///
/// Pure: the same inputs always give the same lines, so heights stay stable
/// between layout passes. Selection changes colours only, never the height.
pub fn render_item(
    result: &SearchResult,
    selected: bool,
    width: u16,
    max_item_width: u16,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let box_width = item_width(width, max_item_width);
    let inner_width = box_width - BOX_CHROME;

    let (border, fill) = if selected {
        (theme.selected_border, Style::default().bg(theme.selected_background))
    } else {
        (theme.border, Style::default())
    };

    let mut rows: Vec<(String, Style)> = Vec::new();
    for line in wrap_text(&result.title, inner_width) {
        rows.push((line, theme.title));
    }
    for line in wrap_text(&result.url, inner_width) {
        rows.push((line, theme.url));
    }
    if !result.snippet.is_empty() {
        for line in wrap_text(&result.snippet, inner_width) {
            rows.push((line, theme.snippet));
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 3);
    let horizontal = "─".repeat(box_width - 2);

    lines.push(Line::from(Span::styled(format!("╭{horizontal}╮"), border)));
    for (text, style) in rows {
        let padding = inner_width.saturating_sub(text.width());
        lines.push(Line::from(vec![
            Span::styled("│", border),
            Span::styled(" ", fill),
            Span::styled(text, style.patch(fill)),
            Span::styled(" ".repeat(padding + 1), fill),
            Span::styled("│", border),
        ]));
    }
    lines.push(Line::from(Span::styled(format!("╰{horizontal}╯"), border)));
    lines.push(Line::default());

    lines
}

/// Wrap text to fit within the given width, honouring embedded newlines
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let max_width = max_width.max(1);
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let cleaned: String = raw_line
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        if cleaned.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        out.extend(wrap(&cleaned, max_width).into_iter().map(|cow| cow.into_owned()));
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}
