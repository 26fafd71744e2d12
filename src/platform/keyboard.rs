use crate::prompt::{Key, KeySource};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io;
use std::time::Duration;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Reads single key presses from the terminal in raw mode.
#[derive(Debug, Default)]
pub struct TerminalKeys {
    raw: bool,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeySource for TerminalKeys {
    fn poll_available(&mut self) -> io::Result<bool> {
        event::poll(POLL_INTERVAL)
    }

    fn read_key(&mut self) -> io::Result<Key> {
        match event::read()? {
            Event::Key(key_event) => map_key(key_event),
            _ => Ok(Key::Other),
        }
    }

    fn capture(&mut self) -> io::Result<()> {
        if !self.raw {
            terminal::enable_raw_mode()?;
            self.raw = true;
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.raw {
            if let Err(err) = terminal::disable_raw_mode() {
                warn!("Failed to restore terminal mode: {}", err);
            }
            self.raw = false;
        }
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        self.release();
    }
}

/// Raw mode turns Ctrl+C into an ordinary key; it is surfaced as an
/// `Interrupted` error so the run ends with the terminal restored.
fn map_key(key_event: KeyEvent) -> io::Result<Key> {
    // Windows reports releases too; only presses count.
    if key_event.kind == KeyEventKind::Release {
        return Ok(Key::Other);
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match key_event.code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"));
        }
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        // Raw mode delivers a bare line feed as Ctrl+J.
        KeyCode::Char('j') | KeyCode::Char('m') if ctrl => Key::Enter,
        KeyCode::Char('\r') | KeyCode::Char('\n') => Key::Enter,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    Ok(key)
}
