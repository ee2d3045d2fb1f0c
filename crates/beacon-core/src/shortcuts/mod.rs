//! Shortcut file parsing and the default shortcut document.
//!
//! The shortcut file is a small INI dialect:
//!
//! ```text
//! ; comment
//! [commands]
//! toggle = Ctrl+F1    ; trailing comments are allowed
//! stop   = Cmd+/
//! ```
//!
//! Only the `[commands]` section is read.  Each entry binds a command name to
//! a `modifier+key` pair; the names on both sides of the `+` are resolved later
//! by the [`crate::keymap::KeyMapper`], not here.

pub mod defaults;
pub mod key_config;

use std::path::PathBuf;

use thiserror::Error;

pub use defaults::{default_shortcuts, write_default_shortcuts};
pub use key_config::KeyConfig;

/// Error type for shortcut file operations.
#[derive(Debug, Error)]
pub enum ShortcutConfigError {
    /// The shortcut file could not be opened or read.
    #[error("failed to open config file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The default shortcut file (or its directory) could not be created.
    #[error("failed to create default config file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The default shortcut document could not be written.
    #[error("failed to write default configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry in `[commands]` has no `+` between modifier and key.
    #[error("invalid shortcut format for command: {0}")]
    InvalidFormat(String),

    /// No entry exists for the requested command.
    #[error("no shortcut configured for command: {0}")]
    NotConfigured(String),
}

/// One `modifier+key` binding as written in the shortcut file.
///
/// Both names are trimmed but otherwise kept verbatim (case included).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortcutConfig {
    /// Modifier name, e.g. `"Ctrl"`, `"Alt"`, `"Win"`, `"Cmd"`.
    pub modifier: String,
    /// Key name, e.g. `"F1"`, `"/"`, `"Num 1"`.
    pub key: String,
}
