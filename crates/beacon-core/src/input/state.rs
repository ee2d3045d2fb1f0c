//! Raw key-state queries.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use super::KeyEvent;

/// Raw per-key state query, the equivalent of Win32 `GetAsyncKeyState`.
///
/// The returned value is platform-encoded; callers AND it with the register's
/// pressed mask to decide whether the key is held.
pub trait KeyStateQuery: Send + Sync {
    fn key_state(&self, code: i32) -> i32;
}

/// Event-driven key-state tracker.
///
/// Fed with every hook event, it remembers which codes are currently down and
/// answers [`KeyStateQuery::key_state`] with the pressed mask for held keys.
/// Used on platforms without a global async key-state API, and in tests.
#[derive(Debug)]
pub struct PressedKeys {
    pressed_mask: i32,
    held: Mutex<HashSet<i32>>,
    last: Mutex<Option<KeyEvent>>,
}

impl PressedKeys {
    pub fn new(pressed_mask: i32) -> Self {
        Self {
            pressed_mask,
            held: Mutex::new(HashSet::new()),
            last: Mutex::new(None),
        }
    }

    /// Applies one hook event to the tracked state.
    pub fn observe(&self, event: &KeyEvent) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if event.kind.is_down() {
            held.insert(event.code);
        } else {
            held.remove(&event.code);
        }
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(*event);
    }

    /// The most recently observed event, i.e. the one being dispatched.
    pub fn last_event(&self) -> Option<KeyEvent> {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn press(&self, code: i32) {
        self.observe(&KeyEvent::down(code));
    }

    pub fn release(&self, code: i32) {
        self.observe(&KeyEvent::up(code));
    }

    pub fn is_held(&self, code: i32) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&code)
    }
}

impl KeyStateQuery for PressedKeys {
    fn key_state(&self, code: i32) -> i32 {
        if self.is_held(code) {
            self.pressed_mask
        } else {
            0
        }
    }
}
