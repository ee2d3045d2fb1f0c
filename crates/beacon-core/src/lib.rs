//! # beacon-core
//!
//! The dispatch core of Beacon: everything between "a key went down somewhere
//! on the desktop" and "the matching command ran".
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or dynamic
//! loaders.  The host binary supplies the platform pieces (the global keyboard
//! hook, the async key-state query, the plugin loader) through the traits
//! defined here.
//!
//! # Architecture overview (for beginners)
//!
//! Beacon binds global keyboard shortcuts to named commands.  A shortcut file
//! such as
//!
//! ```text
//! [commands]
//! toggle = Ctrl+F1
//! stop = Cmd+/
//! ```
//!
//! is turned into a set of *signals*.  Each signal pairs one *input* (a
//! predicate answering "is Ctrl+F1 held right now?") with one *command* (the
//! behaviour to run).  Every keyboard event captured by the OS hook is fanned
//! out to every signal.
//!
//! - **`keymap`** – The key register: human-readable key names (`"F1"`,
//!   `"Ctrl"`, `"Num 1"`) to platform-native key codes, one table per OS.
//!
//! - **`shortcuts`** – Parser for the INI-like shortcut file and the default
//!   document written on first run.
//!
//! - **`input`** – Inputs, the key-state query seam, and the input factories
//!   that combine the shortcut file with the key register.
//!
//! - **`command`** – The command trait and the name → constructor registry
//!   that plugins extend at runtime.
//!
//! - **`signal`** – Signals (input + command + debounce), the signal factory,
//!   and the signal manager that owns the keyboard hook.
//!
//! - **`plugin`** – The binary interface a plugin library exports.
//!
//! - **`app`** – The application collaborators commands act upon.

pub mod app;
pub mod command;
pub mod input;
pub mod keymap;
pub mod plugin;
pub mod shortcuts;
pub mod signal;

pub use app::{Application, OverlayWindow};
pub use command::{Command, CommandCreator, CommandError, CommandRegistry};
pub use input::{
    CompositeInputFactory, DesktopConfig, Input, InputFactory, InputFactoryError, KeyEvent,
    KeyEventKind, KeyStateQuery, KeyboardInput, KeyboardInputFactory, PressedKeys,
    ShortcutsSource,
};
pub use keymap::{KeyError, KeyMapper, KeyRegister, KEY_PRESSED_MASK};
pub use plugin::{Plugin, PluginBox, PluginContext};
pub use shortcuts::{KeyConfig, ShortcutConfig, ShortcutConfigError};
pub use signal::{
    Clock, HookCallback, HookError, InputSignal, KeyboardHook, KeyboardSignalFactory,
    KeyboardSignalManager, MockKeyboardHook, MonotonicClock, Signal, SignalError, SignalFactory,
    DEBOUNCE_WINDOW,
};
