//! Mock keyboard hook for unit testing.
//!
//! Lets tests fire synthetic [`KeyEvent`]s through the installed callback
//! without an OS message loop.

use std::sync::{Arc, Mutex, PoisonError};

use super::{HookCallback, HookError, KeyboardHook};
use crate::input::KeyEvent;

#[derive(Default)]
struct HookState {
    callback: Option<HookCallback>,
    install_count: u32,
    uninstall_count: u32,
    install_error: Option<HookError>,
}

/// A [`KeyboardHook`] that records calls and delivers events on demand.
///
/// Clones share state, so a test can keep one handle while the signal
/// manager owns another.
#[derive(Clone, Default)]
pub struct MockKeyboardHook {
    state: Arc<Mutex<HookState>>,
}

impl MockKeyboardHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook whose every `install` fails with `error`.
    pub fn failing(error: HookError) -> Self {
        let hook = Self::new();
        hook.lock().install_error = Some(error);
        hook
    }

    /// Delivers `event` to the installed callback.
    ///
    /// Returns `false` if no callback is installed.
    pub fn fire(&self, event: KeyEvent) -> bool {
        // Clone out so the callback runs without our lock held.
        let callback = self.lock().callback.clone();
        match callback {
            Some(callback) => {
                callback(&event);
                true
            }
            None => false,
        }
    }

    pub fn install_count(&self) -> u32 {
        self.lock().install_count
    }

    pub fn uninstall_count(&self) -> u32 {
        self.lock().uninstall_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyboardHook for MockKeyboardHook {
    fn install(&mut self, callback: HookCallback) -> Result<(), HookError> {
        let mut state = self.lock();
        state.install_count += 1;
        if let Some(err) = state.install_error.clone() {
            return Err(err);
        }
        if state.callback.is_some() {
            return Err(HookError::AlreadyInstalled);
        }
        state.callback = Some(callback);
        Ok(())
    }

    fn uninstall(&mut self) -> bool {
        let mut state = self.lock();
        state.uninstall_count += 1;
        state.callback.take().is_some()
    }

    fn is_installed(&self) -> bool {
        self.lock().callback.is_some()
    }
}
