//! crossterm key events to game keys
//!
//! Terminals with keyboard enhancement report `Press`/`Repeat`/`Release`.
//! Classic terminals only report presses (auto-repeat shows up as more
//! presses), so there a key counts as released once it has been silent for
//! `HOLD_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

use super::input::{Key, KeyEvent};

/// Frames a key stays held without a fresh press or repeat. OS key repeat
/// runs at 15 Hz or faster, which refreshes well inside this window.
pub const HOLD_WINDOW: u64 = 6;

pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') | KeyCode::Char('C') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Quit)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Fire)
        }
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct TerminalKeys {
    /// The terminal reports key releases
    enhanced: bool,
    /// Frame each held key was last pressed or repeated
    last_seen: HashMap<Key, u64>,
}

impl TerminalKeys {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            last_seen: HashMap::new(),
        }
    }

    /// Translate one terminal event observed during `frame`
    pub fn translate(&mut self, event: &Event, frame: u64) -> Option<KeyEvent> {
        let Event::Key(key_event) = event else {
            return None;
        };
        let key = map_key(key_event.code, key_event.modifiers)?;
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(key, frame);
                Some(KeyEvent::Down(key))
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
                Some(KeyEvent::Up(key))
            }
        }
    }

    /// Releases for keys that went quiet (classic terminals only)
    pub fn expire(&mut self, frame: u64) -> Vec<KeyEvent> {
        if self.enhanced {
            return Vec::new();
        }
        let mut released: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|&(_, &seen)| frame.saturating_sub(seen) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        released.sort_by_key(|k| *k as u8);
        for key in &released {
            self.last_seen.remove(key);
        }
        released.into_iter().map(KeyEvent::Up).collect()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent as TermKeyEvent, KeyEventState};

    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(TermKeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_mapping() {
        assert_eq!(map_key(KeyCode::Left, KeyModifiers::NONE), Some(Key::Left));
        assert_eq!(map_key(KeyCode::Char('d'), KeyModifiers::NONE), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Char(' '), KeyModifiers::NONE), Some(Key::Fire));
        assert_eq!(map_key(KeyCode::Enter, KeyModifiers::NONE), Some(Key::Restart));
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Key::Quit));
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::NONE), None);
    }

    #[test]
    fn test_classic_terminal_expires_keys() {
        let mut keys = TerminalKeys::new(false);
        let down = keys.translate(&key(KeyCode::Left, KeyEventKind::Press), 10);
        assert_eq!(down, Some(KeyEvent::Down(Key::Left)));

        assert!(keys.expire(10 + HOLD_WINDOW).is_empty());
        assert_eq!(keys.expire(11 + HOLD_WINDOW), vec![KeyEvent::Up(Key::Left)]);
        // Already released
        assert!(keys.expire(100).is_empty());
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut keys = TerminalKeys::new(false);
        keys.translate(&key(KeyCode::Right, KeyEventKind::Press), 0);
        keys.translate(&key(KeyCode::Right, KeyEventKind::Press), 5);
        assert!(keys.expire(5 + HOLD_WINDOW).is_empty());
    }

    #[test]
    fn test_enhanced_terminal_uses_release() {
        let mut keys = TerminalKeys::new(true);
        keys.translate(&key(KeyCode::Char(' '), KeyEventKind::Press), 0);
        assert!(keys.expire(1000).is_empty());
        let up = keys.translate(&key(KeyCode::Char(' '), KeyEventKind::Release), 1001);
        assert_eq!(up, Some(KeyEvent::Up(Key::Fire)));
    }

    #[test]
    fn test_ignores_other_events() {
        let mut keys = TerminalKeys::new(false);
        assert_eq!(keys.translate(&Event::FocusLost, 0), None);
        assert_eq!(keys.translate(&key(KeyCode::Tab, KeyEventKind::Press), 0), None);
    }
}
