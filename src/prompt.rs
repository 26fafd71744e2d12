use std::io;
use tracing::trace;

/// A key press as seen by the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Carriage return or line feed.
    Enter,
    Esc,
    Char(char),
    Other,
}

/// Source of single key presses.
///
/// `capture` / `release` bracket one prompt wait; terminal implementations
/// switch raw mode on and off there.
pub trait KeySource {
    fn poll_available(&mut self) -> io::Result<bool>;
    fn read_key(&mut self) -> io::Result<Key>;

    fn capture(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn release(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Delete,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Waiting,
    Confirmed,
    Declined,
}

/// Enter confirms, Esc declines, everything else is swallowed.
#[derive(Debug)]
pub struct ConfirmationPrompt {
    state: PromptState,
}

impl Default for ConfirmationPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationPrompt {
    pub fn new() -> Self {
        Self {
            state: PromptState::Waiting,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Applies one key. Returns the decision once the prompt has left
    /// `Waiting`; keys arriving after that do not change it.
    pub fn feed(&mut self, key: Key) -> Option<Decision> {
        if self.state == PromptState::Waiting {
            match key {
                Key::Enter => self.state = PromptState::Confirmed,
                Key::Esc => self.state = PromptState::Declined,
                other => trace!(key = ?other, "Ignoring key"),
            }
        }
        self.decision()
    }

    pub fn decision(&self) -> Option<Decision> {
        match self.state {
            PromptState::Waiting => None,
            PromptState::Confirmed => Some(Decision::Delete),
            PromptState::Declined => Some(Decision::Skip),
        }
    }

    /// Blocks until `keys` delivers Enter or Esc.
    pub fn wait<K: KeySource>(&mut self, keys: &mut K) -> io::Result<Decision> {
        keys.capture()?;
        let result = self.wait_captured(keys);
        keys.release();
        result
    }

    fn wait_captured<K: KeySource>(&mut self, keys: &mut K) -> io::Result<Decision> {
        loop {
            if let Some(decision) = self.decision() {
                return Ok(decision);
            }
            if keys.poll_available()? {
                let key = keys.read_key()?;
                self.feed(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed key sequence; errors once it runs dry instead of
    /// blocking forever.
    struct ScriptedKeys {
        keys: VecDeque<Key>,
        idle_polls: usize,
        captured: bool,
        releases: usize,
    }

    impl ScriptedKeys {
        fn new(keys: &[Key]) -> Self {
            Self {
                keys: keys.iter().copied().collect(),
                idle_polls: 0,
                captured: false,
                releases: 0,
            }
        }
    }

    impl KeySource for ScriptedKeys {
        fn poll_available(&mut self) -> io::Result<bool> {
            assert!(self.captured, "polled outside of capture");
            if self.keys.is_empty() {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"));
            }
            // Pretend the first poll times out, like a real terminal would.
            if self.idle_polls == 0 {
                self.idle_polls += 1;
                return Ok(false);
            }
            Ok(true)
        }

        fn read_key(&mut self) -> io::Result<Key> {
            Ok(self.keys.pop_front().unwrap())
        }

        fn capture(&mut self) -> io::Result<()> {
            self.captured = true;
            Ok(())
        }

        fn release(&mut self) {
            self.captured = false;
            self.releases += 1;
        }
    }

    #[test]
    fn test_enter_confirms() {
        let mut keys = ScriptedKeys::new(&[Key::Enter]);
        let mut prompt = ConfirmationPrompt::new();
        assert_eq!(prompt.wait(&mut keys).unwrap(), Decision::Delete);
        assert_eq!(prompt.state(), PromptState::Confirmed);
    }

    #[test]
    fn test_esc_declines() {
        let mut keys = ScriptedKeys::new(&[Key::Esc]);
        let mut prompt = ConfirmationPrompt::new();
        assert_eq!(prompt.wait(&mut keys).unwrap(), Decision::Skip);
        assert_eq!(prompt.state(), PromptState::Declined);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut keys = ScriptedKeys::new(&[Key::Char('y'), Key::Other, Key::Char('n'), Key::Enter]);
        let mut prompt = ConfirmationPrompt::new();
        assert_eq!(prompt.wait(&mut keys).unwrap(), Decision::Delete);
        assert!(keys.keys.is_empty());
    }

    #[test]
    fn test_stops_reading_after_decision() {
        let mut keys = ScriptedKeys::new(&[Key::Esc, Key::Enter]);
        let mut prompt = ConfirmationPrompt::new();
        assert_eq!(prompt.wait(&mut keys).unwrap(), Decision::Skip);
        assert_eq!(keys.keys.len(), 1);
        assert_eq!(keys.releases, 1);
    }

    #[test]
    fn test_source_error_propagates_and_releases() {
        let mut keys = ScriptedKeys::new(&[Key::Char('q')]);
        let mut prompt = ConfirmationPrompt::new();
        let err = prompt.wait(&mut keys).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(prompt.state(), PromptState::Waiting);
        assert!(!keys.captured);
    }

    #[test]
    fn test_feed_is_sticky() {
        let mut prompt = ConfirmationPrompt::new();
        assert_eq!(prompt.feed(Key::Other), None);
        assert_eq!(prompt.feed(Key::Enter), Some(Decision::Delete));
        assert_eq!(prompt.feed(Key::Esc), Some(Decision::Delete));
    }
}
