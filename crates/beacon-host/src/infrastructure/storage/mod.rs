//! Storage infrastructure: the host's TOML settings file.
//!
//! The shortcut bindings themselves live in a separate INI file owned by the
//! core crate; this file only says where to find it (and the plugin and
//! screenshot folders) plus the default log level.

pub mod config;
