//! Global keyboard hook adapters.
//!
//! On Windows this installs a `WH_KEYBOARD_LL` hook on the thread that runs
//! the message loop.  The OS calls the hook procedure on that same thread
//! while it sits in `GetMessageW`, so every signal check runs synchronously
//! there.
//!
//! # Windows-Specific Implementation
//!
//! Windows silently removes a low-level hook whose callback takes longer than
//! the `LowLevelHooksTimeout` registry value (about 300ms by default).  Slow
//! commands therefore risk losing the hook for the rest of the session.
//!
//! # Other platforms
//!
//! There is no global hook yet; [`UnsupportedKeyboardHook`] reports
//! [`HookError::Unsupported`] and the signal manager runs in degraded mode.
//!
//! # Testability
//!
//! [`MockKeyboardHook`] lets tests fire synthetic events through the
//! installed callback without an OS message loop.

use std::sync::Arc;

use beacon_core::{HookCallback, HookError, KeyRegister, KeyStateQuery, KeyboardHook, PressedKeys};
use tracing::warn;

pub use beacon_core::MockKeyboardHook;

#[cfg(target_os = "windows")]
pub mod windows;

/// Hook for platforms without a global keyboard hook.
#[derive(Debug, Default)]
pub struct UnsupportedKeyboardHook;

impl KeyboardHook for UnsupportedKeyboardHook {
    fn install(&mut self, _callback: HookCallback) -> Result<(), HookError> {
        Err(HookError::Unsupported(std::env::consts::OS.to_string()))
    }

    fn uninstall(&mut self) -> bool {
        false
    }

    fn is_installed(&self) -> bool {
        false
    }
}

/// The production hook for the compile target.
pub fn platform_hook() -> Box<dyn KeyboardHook> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsKeyboardHook::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(UnsupportedKeyboardHook)
    }
}

/// Key-state plumbing for one run of the host.
pub struct KeyState {
    /// Tracker the signal manager feeds with every hook event.
    pub tracker: Arc<PressedKeys>,
    /// Query the keyboard inputs read.
    pub query: Arc<dyn KeyStateQuery>,
}

/// Builds the key-state query for the compile target.
///
/// Windows asks the OS for every key except the one being dispatched; other
/// platforms answer entirely from the hook events.
pub fn platform_key_state(register: &KeyRegister) -> KeyState {
    let mask = register.pressed_mask().unwrap_or_else(|e| {
        warn!("{e}; assuming pressed mask 0x8000");
        0x8000
    });
    let tracker = Arc::new(PressedKeys::new(mask));

    #[cfg(target_os = "windows")]
    let query: Arc<dyn KeyStateQuery> = Arc::new(windows::AsyncKeyState::new(Arc::clone(&tracker)));

    #[cfg(not(target_os = "windows"))]
    let query: Arc<dyn KeyStateQuery> = tracker.clone();

    KeyState { tracker, query }
}
