use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the window.
///
/// Holds "is down" information; callers poll it once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                if !*focused {
                    // Release events are not delivered to an unfocused window.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn key_is_held_until_released() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::W, KeyState::Pressed));
        assert!(s.key_down(Key::W));

        // Repeats arrive as further presses and keep the key held.
        s.apply_event(&key(Key::W, KeyState::Pressed));
        assert!(s.key_down(Key::W));

        s.apply_event(&key(Key::W, KeyState::Released));
        assert!(!s.key_down(Key::W));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::ArrowLeft, KeyState::Pressed));
        s.apply_event(&key(Key::D, KeyState::Pressed));

        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.key_down(Key::ArrowLeft));
        assert!(!s.key_down(Key::D));
    }

    #[test]
    fn focus_gain_keeps_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::A, KeyState::Pressed));
        s.apply_event(&InputEvent::Focused(true));
        assert!(s.key_down(Key::A));
    }

    #[test]
    fn releasing_unheld_key_is_harmless() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::S, KeyState::Released));
        assert!(!s.key_down(Key::S));
    }
}
