use std::{
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal,
};

use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode;
use crate::config::Config;
use crate::errors::CliError;
use crate::wizard::BookingSession;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashOutcome {
    Finished,
    /// ESC or Ctrl-C before the timer fired.
    Aborted,
}

/// Shows the brand screen and blocks until the session's splash timer fires.
pub fn run(session: &mut BookingSession, config: &Config) -> Result<SplashOutcome, CliError> {
    let formatter = Formatter::new();
    println!();
    println!("{}", formatter.highlight_text(&config.brand));
    println!("{}", formatter.muted_text("Orçamento de paisagismo"));
    println!();

    let keys = if test_mode::is_enabled() {
        None
    } else {
        KeyWatch::start()
    };

    loop {
        let now = Instant::now();
        if session.tick(now) {
            return Ok(SplashOutcome::Finished);
        }
        let Some(remaining) = session.splash_remaining(now) else {
            // Timer cancelled or never armed.
            return Ok(SplashOutcome::Aborted);
        };
        let wait = remaining.min(POLL_INTERVAL);
        match &keys {
            Some(_) => {
                if event::poll(wait)? && is_abort(event::read()?) {
                    session.teardown();
                    return Ok(SplashOutcome::Aborted);
                }
            }
            None => thread::sleep(wait),
        }
    }
}

fn is_abort(event: Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C')))
}

/// Raw mode while the splash waits, so single keys can be read.
struct KeyWatch;

impl KeyWatch {
    fn start() -> Option<Self> {
        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self),
            Err(err) => {
                tracing::debug!(%err, "raw mode unavailable, splash ignores keys");
                None
            }
        }
    }
}

impl Drop for KeyWatch {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn escape_and_ctrl_c_abort() {
        assert!(is_abort(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))));
        assert!(is_abort(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))));
        assert!(!is_abort(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::NONE
        ))));
        assert!(!is_abort(Event::FocusGained));
    }
}
