//! Signals: input + command + debounce, and the machinery that drives them.
//!
//! # Dispatch path (for beginners)
//!
//! ```text
//!  OS keyboard hook ──► HookCallback ──► KeyboardSignalManager::check_signals
//!                                              │
//!                           for every signal, in creation order
//!                                              ▼
//!                          InputSignal::check ── input active? ── debounce ok?
//!                                                                    │
//!                                                                    ▼
//!                                                          Command::execute
//! ```
//!
//! Everything on this path runs synchronously on the thread that owns the
//! hook.  A slow command delays every later keyboard event.
//!
//! # Failure isolation
//!
//! A command that returns an error or panics does not take the process down.
//! The failure is logged and that one signal is stopped; every other signal
//! keeps firing.

pub mod factory;
pub mod input_signal;
pub mod manager;
pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::input::{InputFactoryError, KeyEvent};

pub use factory::{KeyboardSignalFactory, SignalFactory};
pub use input_signal::{Clock, InputSignal, MonotonicClock};
pub use manager::KeyboardSignalManager;
pub use mock::MockKeyboardHook;

/// Minimum time between two executions of a debounced signal's command.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for building the signal set.
#[derive(Debug, Error)]
pub enum SignalError {
    /// The shortcut file binds a command nobody registered.
    #[error("unknown command in configuration: {0}")]
    UnknownCommand(String),

    /// The input factory failed to initialize or build an input.
    #[error(transparent)]
    Input(#[from] InputFactoryError),
}

/// Error type for keyboard hook installation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// The OS refused to install the hook.
    #[error("failed to install keyboard hook: {0}")]
    InstallFailed(String),

    /// A hook is already installed in this process.
    #[error("keyboard hook already installed")]
    AlreadyInstalled,

    /// No global keyboard hook exists for this platform.
    #[error("keyboard hook not supported on {0}")]
    Unsupported(String),
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// A runtime binding of one input to one command.
///
/// Signals start inactive; [`Signal::check`] does nothing until
/// [`Signal::start`] has been called.
pub trait Signal: Send {
    fn start(&mut self);

    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// Evaluates the input against `event` and runs the command if it fires.
    fn check(&mut self, event: &KeyEvent);
}

/// Callback the hook invokes for every qualifying keyboard message.
pub type HookCallback = Arc<dyn Fn(&KeyEvent) + Send + Sync>;

/// OS-level global keyboard hook.
///
/// Implementations deliver only key-down, key-up, sys-key-down and sys-key-up
/// messages to the callback and pass every message on to the next hook.
pub trait KeyboardHook: Send {
    fn install(&mut self, callback: HookCallback) -> Result<(), HookError>;

    /// Removes the hook.  Returns `false` if none was installed.
    fn uninstall(&mut self) -> bool;

    fn is_installed(&self) -> bool;
}
