//! Plugin discovery, loading and lifecycle.
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//!  plugins/ dir ──► DylibLoader::load ──► PluginManager ──► initialize_all
//!                   (createPlugin)          (by name)        (register commands)
//!
//!  shutdown_all ──► Plugin::shutdown ──► destroyPlugin ──► library unloaded
//!                   (unregister commands)
//! ```
//!
//! A bad plugin file never stops the scan: load failures are logged and
//! counted as "not loaded".  Only a missing directory or a plugin whose
//! `initialize` returns `false` makes [`manager::PluginManager::setup_from_directory`]
//! fail.

pub mod loader;
pub mod manager;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use loader::{DylibLoader, LoadedPlugin, PluginSource};
pub use manager::PluginManager;

/// File extensions recognised as plugin libraries.
#[cfg(target_os = "windows")]
pub const PLUGIN_EXTENSIONS: &[&str] = &["dll"];

/// File extensions recognised as plugin libraries.
#[cfg(not(target_os = "windows"))]
pub const PLUGIN_EXTENSIONS: &[&str] = &["so", "dylib"];

/// Error type for plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin directory does not exist.
    #[error("plugin directory does not exist: {0}")]
    DirectoryMissing(PathBuf),

    /// At least one plugin's `initialize` returned `false`.
    #[error("failed to initialize plugins: {}", .0.join(", "))]
    InitializationFailed(Vec<String>),

    /// A library could not be opened or lacks the plugin entry points.
    #[error("failed to load plugin {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },
}

/// Whether `path` has one of the [`PLUGIN_EXTENSIONS`] (case-insensitive).
pub fn has_plugin_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PLUGIN_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
