use crossterm::event::{KeyEvent, MouseEvent};

/// Events that drive the result browser
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal mouse event (wheel scrolling)
    Mouse(MouseEvent),
    /// Terminal resize event (width, height)
    Resize(u16, u16),
    /// Periodic tick; carries no state change
    Tick,
    /// Request to quit the application
    Quit,
}

impl Event {
    /// Translate a raw crossterm event; returns `None` for events the browser ignores.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as TermEvent, KeyEventKind};

        match event {
            // Windows reports both press and release; only presses count.
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            TermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            TermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
