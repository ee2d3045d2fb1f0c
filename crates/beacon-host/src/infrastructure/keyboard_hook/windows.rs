//! Windows low-level keyboard hook implementation.
//!
//! Installs `WH_KEYBOARD_LL` on the calling thread, which must then run a
//! Win32 message loop (see [`crate::infrastructure::message_loop`]).  The
//! hook procedure forwards key-down, key-up, sys-key-down and sys-key-up
//! messages to the installed [`HookCallback`] and always passes the message
//! on with `CallNextHookEx`.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use beacon_core::keymap::windows_vk;
use beacon_core::{HookCallback, HookError, KeyEvent, KeyEventKind, KeyStateQuery, KeyboardHook, PressedKeys};
use tracing::{debug, error, info, warn};
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT,
    WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

/// Callback the hook procedure delivers to.  Cleared on uninstall, before
/// the owning manager releases its signals.
static HOOK_CALLBACK: Mutex<Option<HookCallback>> = Mutex::new(None);

/// Maps a hook message to the event kind it carries, or `None` for messages
/// the dispatch core ignores.
pub fn classify_message(message: u32) -> Option<KeyEventKind> {
    match message {
        WM_KEYDOWN => Some(KeyEventKind::KeyDown),
        WM_KEYUP => Some(KeyEventKind::KeyUp),
        WM_SYSKEYDOWN => Some(KeyEventKind::SysKeyDown),
        WM_SYSKEYUP => Some(KeyEventKind::SysKeyUp),
        _ => None,
    }
}

// ── Hook handle ───────────────────────────────────────────────────────────────

struct HookHandle(HHOOK);

// SAFETY: an HHOOK is an opaque identifier, not a pointer we dereference.
// UnhookWindowsHookEx accepts it from any thread.
unsafe impl Send for HookHandle {}

/// `WH_KEYBOARD_LL` hook.  Only one may be installed per process.
pub struct WindowsKeyboardHook {
    handle: Option<HookHandle>,
}

impl WindowsKeyboardHook {
    pub fn new() -> Self {
        Self { handle: None }
    }
}

impl Default for WindowsKeyboardHook {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardHook for WindowsKeyboardHook {
    fn install(&mut self, callback: HookCallback) -> Result<(), HookError> {
        {
            let mut slot = HOOK_CALLBACK.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_some() {
                return Err(HookError::AlreadyInstalled);
            }
            *slot = Some(callback);
        }

        // SAFETY: a null module name asks for the executable's own module;
        // the hook procedure lives in it.
        let module = unsafe { GetModuleHandleW(PCWSTR::null()) }
            .map(|m| HINSTANCE(m.0))
            .ok();

        // SAFETY: `keyboard_hook_proc` matches HOOKPROC and stays valid for the
        // life of the process.  The calling thread runs the message loop.
        match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), module, 0) } {
            Ok(hook) => {
                self.handle = Some(HookHandle(hook));
                info!("WH_KEYBOARD_LL hook installed");
                Ok(())
            }
            Err(e) => {
                *HOOK_CALLBACK.lock().unwrap_or_else(PoisonError::into_inner) = None;
                Err(HookError::InstallFailed(e.to_string()))
            }
        }
    }

    fn uninstall(&mut self) -> bool {
        let Some(HookHandle(hook)) = self.handle.take() else {
            return false;
        };
        // SAFETY: `hook` came from a successful SetWindowsHookExW and is
        // released exactly once here.
        if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
            warn!("UnhookWindowsHookEx failed: {e}");
        }
        *HOOK_CALLBACK.lock().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("WH_KEYBOARD_LL hook removed");
        true
    }

    fn is_installed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for WindowsKeyboardHook {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows on the thread that installed the hook, from inside its
/// message loop.  It must return quickly or Windows removes the hook.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        if let Some(kind) = classify_message(w_param.0 as u32) {
            // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
            let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
            dispatch(KeyEvent::new(kind, kbs.vkCode as i32));
        }
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}

fn dispatch(event: KeyEvent) {
    // Clone out so the callback runs without the slot locked.
    let callback = HOOK_CALLBACK
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if let Some(callback) = callback {
        // Unwinding across the FFI boundary would abort the process.
        if catch_unwind(AssertUnwindSafe(|| callback(&event))).is_err() {
            error!("keyboard hook callback panicked on {:?}", event);
        }
    }
}

// ── Key state ─────────────────────────────────────────────────────────────────

/// [`KeyStateQuery`] backed by `GetAsyncKeyState`.
///
/// Inside a low-level hook the async state of the key being dispatched has
/// not been updated yet, so that one key is answered from the hook payload
/// recorded in `tracker`.  Every other key comes from the OS.
pub struct AsyncKeyState {
    tracker: Arc<PressedKeys>,
}

impl AsyncKeyState {
    pub fn new(tracker: Arc<PressedKeys>) -> Self {
        Self { tracker }
    }
}

impl KeyStateQuery for AsyncKeyState {
    fn key_state(&self, code: i32) -> i32 {
        if self.tracker.last_event().is_some_and(|e| e.code == code) {
            return self.tracker.key_state(code);
        }
        // SAFETY: GetAsyncKeyState has no preconditions; unknown codes read 0.
        let state = unsafe { GetAsyncKeyState(code) };
        i32::from(state as u16) & windows_vk::PRESSED_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message_accepts_key_messages() {
        assert_eq!(classify_message(WM_KEYDOWN), Some(KeyEventKind::KeyDown));
        assert_eq!(classify_message(WM_KEYUP), Some(KeyEventKind::KeyUp));
        assert_eq!(classify_message(WM_SYSKEYDOWN), Some(KeyEventKind::SysKeyDown));
        assert_eq!(classify_message(WM_SYSKEYUP), Some(KeyEventKind::SysKeyUp));
    }

    #[test]
    fn test_classify_message_ignores_everything_else() {
        // WM_CHAR and WM_MOUSEMOVE
        assert_eq!(classify_message(0x0102), None);
        assert_eq!(classify_message(0x0200), None);
    }

    #[test]
    fn test_async_key_state_answers_in_flight_key_from_payload() {
        // Arrange
        let tracker = Arc::new(PressedKeys::new(windows_vk::PRESSED_MASK));
        let query = AsyncKeyState::new(Arc::clone(&tracker));

        // Act
        tracker.observe(&KeyEvent::down(0x70));

        // Assert
        assert_eq!(query.key_state(0x70), windows_vk::PRESSED_MASK);
        tracker.observe(&KeyEvent::up(0x70));
        assert_eq!(query.key_state(0x70), 0);
    }
}
