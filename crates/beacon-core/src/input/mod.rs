//! Inputs: "is this shortcut held right now?" predicates and their factories.
//!
//! # How an input decides (for beginners)
//!
//! An [`Input`] does not remember which keys went down.  Instead it asks a
//! [`KeyStateQuery`] for the raw state of two key codes (the key and its
//! modifier) and tests each against the platform's pressed bitmask.  On
//! Windows the query is `GetAsyncKeyState`; elsewhere [`PressedKeys`] rebuilds
//! the same answer from the events the keyboard hook delivers.
//!
//! Inputs are built by an [`InputFactory`], which owns the parsed shortcut file
//! and turns a command name into resolved key codes.

pub mod factory;
pub mod keyboard;
pub mod state;

use thiserror::Error;

use crate::keymap::KeyError;
use crate::shortcuts::ShortcutConfigError;

pub use factory::{
    CompositeInputFactory, DesktopConfig, InputFactory, KeyboardInputFactory, ShortcutsSource,
    DEFAULT_SHORTCUTS_PATH,
};
pub use keyboard::KeyboardInput;
pub use state::{KeyStateQuery, PressedKeys};

// ── Keyboard events ───────────────────────────────────────────────────────────

/// Kind of keyboard message delivered by the OS hook.
///
/// Only these four kinds ever reach the signal layer; the hook drops every
/// other message type before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
    /// Key pressed while Alt is held (`WM_SYSKEYDOWN`).
    SysKeyDown,
    /// Key released while Alt is held (`WM_SYSKEYUP`).
    SysKeyUp,
}

impl KeyEventKind {
    /// Returns `true` for the two "key went down" kinds.
    pub fn is_down(self) -> bool {
        matches!(self, Self::KeyDown | Self::SysKeyDown)
    }
}

/// One keyboard message forwarded from the hook to the signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// Platform key code of the key that changed state.
    pub code: i32,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, code: i32) -> Self {
        Self { kind, code }
    }

    pub fn down(code: i32) -> Self {
        Self::new(KeyEventKind::KeyDown, code)
    }

    pub fn up(code: i32) -> Self {
        Self::new(KeyEventKind::KeyUp, code)
    }
}

// ── Input trait ───────────────────────────────────────────────────────────────

/// A shortcut predicate bound to resolved key codes.
pub trait Input: Send {
    /// Returns `true` if the bound combination is currently asserted.
    ///
    /// `event` is the hook message that triggered the check.  Implementations
    /// backed by a global key-state query may ignore it.
    fn is_active(&self, event: &KeyEvent) -> bool;

    /// Refreshes any cached state.  A no-op for real-time queries.
    fn update(&mut self) {}
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for input factory operations.
#[derive(Debug, Error)]
pub enum InputFactoryError {
    /// An operation was called before [`InputFactory::initialize`].
    #[error("input factory not initialized; call initialize() first")]
    NotInitialized,

    /// The command's key or modifier name is not in the key register.
    #[error("invalid shortcut configuration for command: {command}")]
    InvalidShortcut {
        command: String,
        #[source]
        source: KeyError,
    },

    /// No sub-factory of a composite could build an input for the command.
    #[error("no command found: {0}")]
    NoCommandFound(String),

    /// Loading or generating the shortcut file failed.
    #[error(transparent)]
    Config(#[from] ShortcutConfigError),
}
