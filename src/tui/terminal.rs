use crate::event::Event;
use crate::tui::App;
use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Raw mode, alternate screen and mouse capture for as long as the guard lives.
///
/// Dropping it restores the terminal, including on early returns and panics.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;

        if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        // The panic message must land on the normal screen, not the alternate one.
        chain_panic_hook(restore_terminal);

        tracing::debug!("terminal modes enabled (raw, alternate screen, mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        tracing::debug!("terminal restored");
    }
}

fn restore_terminal() {
    let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

/// Run `restore` before whatever panic hook is currently installed
pub fn chain_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Drive the browser until the user quits.
///
/// Events are handled one at a time; the screen is repainted after every
/// event except ticks.
pub async fn run(app: &mut App) -> Result<()> {
    let _guard = TerminalGuard::acquire()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
        .context("Failed to initialize terminal")?;

    // Crossterm only reports changes, so seed the layout with the current size.
    let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;
    app.handle_event(Event::Resize(width, height))?;

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_RATE);
    let mut needs_draw = true;

    loop {
        if needs_draw {
            terminal
                .draw(|frame| app.render(frame))
                .context("Failed to draw frame")?;
        }

        if app.should_quit() {
            break;
        }

        let event = tokio::select! {
            next = events.next() => match next {
                Some(Ok(raw)) => match Event::from_terminal(raw) {
                    Some(event) => event,
                    None => {
                        needs_draw = false;
                        continue;
                    }
                },
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => Event::Quit,
            },
            _ = ticker.tick() => Event::Tick,
        };

        needs_draw = !matches!(event, Event::Tick);
        app.handle_event(event)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_panic_hook_restores_before_reporting() {
        let restored = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&restored);
        chain_panic_hook(move || flag.store(true, Ordering::SeqCst));

        let outcome = std::thread::spawn(|| panic!("render failed")).join();

        assert!(outcome.is_err());
        assert!(restored.load(Ordering::SeqCst));
    }
}
