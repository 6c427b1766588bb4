use crate::config::BrowserConfig;
use crate::event::{Event, EventResult};
use crate::opener::LinkOpener;
use crate::search::SearchResults;
use crate::tui::result_list::{ResultList, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::tui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame,
};

const KEY_HINTS: &str = "↑/↓: navigate • enter: open • q: quit";

/// Lifecycle of the browser view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No terminal size known yet; nothing but a placeholder can be drawn
    Uninitialized,
    /// Laid out and interactive
    Ready,
}

/// Main application state for the result browser
pub struct App {
    /// Query shown in the header
    query: String,
    /// Engine name shown in the header
    engine_name: String,
    /// Result list with cursor and viewport
    result_list: ResultList,
    /// Where activated links go
    opener: Box<dyn LinkOpener>,
    /// Lines per mouse wheel step
    scroll_lines: u16,
    /// Leave after opening a link
    quit_on_open: bool,
    state: ViewState,
    should_quit: bool,
}

impl App {
    /// Create a browser over one query's results
    pub fn new(
        results: SearchResults,
        query: impl Into<String>,
        engine_name: impl Into<String>,
        theme: Theme,
        browser: &BrowserConfig,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self {
            query: query.into(),
            engine_name: engine_name.into(),
            result_list: ResultList::new(results.items, theme, browser.max_item_width),
            opener,
            scroll_lines: browser.scroll_lines,
            quit_on_open: browser.quit_on_open,
            state: ViewState::Uninitialized,
            should_quit: false,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn result_list(&self) -> &ResultList {
        &self.result_list
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: Event) -> EventResult<()> {
        match event {
            Event::Resize(width, height) => {
                self.result_list.resize(width, height);
                if self.state == ViewState::Uninitialized {
                    tracing::debug!(width, height, "browser ready");
                    self.state = ViewState::Ready;
                }
                Ok(())
            }
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Event::Tick => Ok(()),
        }
    }

    /// Handle mouse events
    fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult<()> {
        let step = self.scroll_lines as isize;
        match mouse.kind {
            MouseEventKind::ScrollUp => self.result_list.scroll_by(-step),
            MouseEventKind::ScrollDown => self.result_list.scroll_by(step),
            _ => {}
        }
        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        tracing::trace!(key = ?key.code, "key pressed");

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        let page = self.result_list.viewport_height().max(1) as isize;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_list.move_cursor(-1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.result_list.move_cursor(1);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.result_list.select_first();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.result_list.select_last();
            }
            KeyCode::PageUp => self.result_list.scroll_by(-page),
            KeyCode::PageDown => self.result_list.scroll_by(page),
            KeyCode::Enter => self.activate(),
            _ => {}
        }
        Ok(())
    }

    /// Open the selected result. Failures are logged and otherwise ignored.
    pub fn activate(&mut self) {
        let Some(result) = self.result_list.selected() else {
            return;
        };

        tracing::info!(url = %result.url, "opening result");
        if let Err(e) = self.opener.open(&result.url) {
            tracing::debug!(error = %e, url = %result.url, "failed to open link");
        }

        if self.quit_on_open {
            self.should_quit = true;
        }
    }

    /// Header line: query and engine, upper-cased
    pub fn header_text(&self) -> String {
        format!(
            " ATLAS: {} | ENGINE: {} ",
            self.query.to_uppercase(),
            self.engine_name.to_uppercase()
        )
    }

    /// Render the application UI
    pub fn render(&self, frame: &mut Frame) {
        if self.state == ViewState::Uninitialized {
            frame.render_widget(Paragraph::new("\n  Initializing..."), frame.area());
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_results(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = self.result_list.theme();
        let header = Line::from(Span::styled(self.header_text(), theme.header));
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let text = Text::from(self.result_list.visible_lines().to_vec());
        frame.render_widget(Paragraph::new(text), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = self.result_list.theme();
        let footer = vec![
            Line::default(),
            Line::from(Span::styled(format!(" {KEY_HINTS}"), theme.footer)),
        ];
        frame.render_widget(Paragraph::new(footer), area);
    }
}
