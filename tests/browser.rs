//! Result browser behaviour: event dispatch, activation and rendering

use atlas::config::BrowserConfig;
use atlas::event::Event;
use atlas::opener::LinkOpener;
use atlas::search::{SearchResult, SearchResults};
use atlas::tui::{App, Theme, ViewState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every URL it is asked to open
#[derive(Clone, Default)]
struct RecordingOpener {
    opened: Rc<RefCell<Vec<String>>>,
    fail: bool,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            anyhow::bail!("no browser available");
        }
        Ok(())
    }
}

fn results(count: usize) -> SearchResults {
    SearchResults {
        items: (0..count)
            .map(|i| {
                SearchResult::new(
                    format!("Result {i}"),
                    format!("https://example.com/{i}"),
                    format!("Snippet {i}"),
                )
            })
            .collect(),
    }
}

fn app_with(count: usize, browser: BrowserConfig, opener: RecordingOpener) -> App {
    App::new(
        results(count),
        "rust",
        "DuckDuckGo",
        Theme::default(),
        &browser,
        Box::new(opener),
    )
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn wheel(kind: MouseEventKind) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    })
}

fn screen(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn test_first_resize_makes_view_ready() {
    let mut app = app_with(3, BrowserConfig::default(), RecordingOpener::default());
    assert_eq!(app.state(), ViewState::Uninitialized);
    assert!(screen(&app, 60, 10).contains("Initializing..."));

    app.handle_event(Event::Resize(80, 24)).unwrap();

    assert_eq!(app.state(), ViewState::Ready);
    assert_eq!(app.result_list().viewport_height(), 20);
}

#[test]
fn test_render_shows_header_results_and_footer() {
    let mut app = app_with(3, BrowserConfig::default(), RecordingOpener::default());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    let text = screen(&app, 80, 24);

    assert!(text.contains("ATLAS: RUST | ENGINE: DUCKDUCKGO"));
    assert!(text.contains("Result 0"));
    assert!(text.contains("https://example.com/0"));
    assert!(text.contains("Snippet 0"));
    assert!(text.contains("↑/↓: navigate • enter: open • q: quit"));
}

#[test]
fn test_arrow_and_vim_keys_move_cursor_within_bounds() {
    let mut app = app_with(3, BrowserConfig::default(), RecordingOpener::default());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    app.handle_event(key(KeyCode::Up)).unwrap();
    assert_eq!(app.result_list().cursor(), 0);

    app.handle_event(key(KeyCode::Down)).unwrap();
    app.handle_event(key(KeyCode::Char('j'))).unwrap();
    app.handle_event(key(KeyCode::Char('j'))).unwrap();
    assert_eq!(app.result_list().cursor(), 2);

    app.handle_event(key(KeyCode::Char('k'))).unwrap();
    assert_eq!(app.result_list().cursor(), 1);

    app.handle_event(key(KeyCode::Home)).unwrap();
    assert_eq!(app.result_list().cursor(), 0);
    app.handle_event(key(KeyCode::End)).unwrap();
    assert_eq!(app.result_list().cursor(), 2);
}

#[test]
fn test_moving_down_scrolls_selected_item_into_view() {
    // 10 rows of chrome-free viewport, 6-row items
    let mut app = app_with(5, BrowserConfig::default(), RecordingOpener::default());
    app.handle_event(Event::Resize(80, 14)).unwrap();
    assert_eq!(app.result_list().scroll_offset(), 0);

    app.handle_event(key(KeyCode::Down)).unwrap();
    // lines_before 6 + height 6 - viewport 10
    assert_eq!(app.result_list().scroll_offset(), 2);

    app.handle_event(key(KeyCode::Down)).unwrap();
    assert_eq!(app.result_list().scroll_offset(), 8);

    app.handle_event(key(KeyCode::Up)).unwrap();
    assert_eq!(app.result_list().scroll_offset(), 6);

    let text = screen(&app, 80, 14);
    assert!(text.contains("Result 1"));
}

#[test]
fn test_mouse_wheel_pans_viewport_only() {
    let mut app = app_with(5, BrowserConfig::default(), RecordingOpener::default());
    app.handle_event(Event::Resize(80, 14)).unwrap();

    app.handle_event(wheel(MouseEventKind::ScrollDown)).unwrap();
    assert_eq!(app.result_list().scroll_offset(), 3);
    assert_eq!(app.result_list().cursor(), 0);

    app.handle_event(wheel(MouseEventKind::ScrollUp)).unwrap();
    app.handle_event(wheel(MouseEventKind::ScrollUp)).unwrap();
    assert_eq!(app.result_list().scroll_offset(), 0);
}

#[test]
fn test_enter_opens_selected_url() {
    let opener = RecordingOpener::default();
    let mut app = app_with(3, BrowserConfig::default(), opener.clone());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    app.handle_event(key(KeyCode::Down)).unwrap();
    app.handle_event(key(KeyCode::Enter)).unwrap();

    assert_eq!(*opener.opened.borrow(), vec!["https://example.com/1".to_string()]);
    assert!(!app.should_quit());
}

#[test]
fn test_open_failure_is_swallowed() {
    let opener = RecordingOpener {
        fail: true,
        ..RecordingOpener::default()
    };
    let mut app = app_with(2, BrowserConfig::default(), opener.clone());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    assert!(app.handle_event(key(KeyCode::Enter)).is_ok());
    assert_eq!(opener.opened.borrow().len(), 1);
    assert!(!app.should_quit());
}

#[test]
fn test_quit_on_open_when_configured() {
    let browser = BrowserConfig {
        quit_on_open: true,
        ..BrowserConfig::default()
    };
    let mut app = app_with(2, browser, RecordingOpener::default());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    app.handle_event(key(KeyCode::Enter)).unwrap();
    assert!(app.should_quit());
}

#[test]
fn test_quit_keys() {
    for event in [
        key(KeyCode::Char('q')),
        key(KeyCode::Esc),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Event::Quit,
    ] {
        let mut app = app_with(1, BrowserConfig::default(), RecordingOpener::default());
        app.handle_event(event).unwrap();
        assert!(app.should_quit());
    }
}

#[test]
fn test_tick_changes_nothing() {
    let mut app = app_with(3, BrowserConfig::default(), RecordingOpener::default());
    app.handle_event(Event::Resize(80, 24)).unwrap();

    app.handle_event(Event::Tick).unwrap();

    assert_eq!(app.result_list().cursor(), 0);
    assert_eq!(app.result_list().scroll_offset(), 0);
    assert!(!app.should_quit());
}
