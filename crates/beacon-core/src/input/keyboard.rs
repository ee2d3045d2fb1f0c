//! The canonical keyboard input: one key plus one modifier.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{Input, KeyEvent, KeyStateQuery};

/// Asserted while both the key and its modifier are held.
pub struct KeyboardInput {
    key_code: i32,
    modifier_code: i32,
    pressed_mask: i32,
    state: Arc<dyn KeyStateQuery>,
}

impl KeyboardInput {
    /// Creates an input from already-resolved codes.
    ///
    /// Name resolution happens in the factory; this constructor never sees
    /// human-readable key names.
    pub fn new(
        key_code: i32,
        modifier_code: i32,
        pressed_mask: i32,
        state: Arc<dyn KeyStateQuery>,
    ) -> Self {
        debug!(
            "initializing keyboard input: key={:#x}, modifier={:#x}",
            key_code, modifier_code
        );
        Self {
            key_code,
            modifier_code,
            pressed_mask,
            state,
        }
    }

    pub fn key_code(&self) -> i32 {
        self.key_code
    }

    pub fn modifier_code(&self) -> i32 {
        self.modifier_code
    }

    fn is_key_pressed(&self) -> bool {
        let pressed = self.state.key_state(self.key_code) & self.pressed_mask != 0;
        if pressed {
            debug!("key {:#x} is pressed", self.key_code);
        }
        pressed
    }

    fn is_modifier_active(&self) -> bool {
        let active = self.state.key_state(self.modifier_code) & self.pressed_mask != 0;
        if active {
            debug!("modifier {:#x} is active", self.modifier_code);
        }
        active
    }
}

impl Input for KeyboardInput {
    fn is_active(&self, _event: &KeyEvent) -> bool {
        self.is_key_pressed() && self.is_modifier_active()
    }
}

impl fmt::Debug for KeyboardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardInput")
            .field("key_code", &format_args!("{:#x}", self.key_code))
            .field("modifier_code", &format_args!("{:#x}", self.modifier_code))
            .field("pressed_mask", &format_args!("{:#x}", self.pressed_mask))
            .finish_non_exhaustive()
    }
}
