//! TOML-based configuration for the Beacon host.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Beacon\config.toml`
//! - Linux:    `~/.config/beacon/config.toml`
//! - macOS:    `~/Library/Application Support/Beacon/config.toml`
//!
//! or from an explicit path given with `--config`.
//!
//! # Example
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [paths]
//! shortcuts = "config/shortcuts.ini"
//! plugins = "plugins"
//! screenshots = "screenshot"
//! ```
//!
//! Every field has a serde default, so a missing file, a missing section or a
//! missing key all fall back to the values above (with `info` logging).
//! Relative paths are resolved against the working directory.

use std::path::{Path, PathBuf};

use beacon_core::app::DEFAULT_SCREENSHOT_DIR;
use beacon_core::input::DEFAULT_SHORTCUTS_PATH;
use beacon_core::ShortcutsSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for reading and writing the Beacon settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the OS nor the environment names a config directory.
    #[error("no config directory for this platform; pass --config")]
    NoPlatformConfigDir,

    #[error("cannot access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode settings as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where the host finds its other files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// The INI file of shortcut bindings.
    #[serde(default = "default_shortcuts")]
    pub shortcuts: PathBuf,
    /// Directory scanned for plugin libraries.
    #[serde(default = "default_plugins")]
    pub plugins: PathBuf,
    /// Folder `clear-screenshot` empties.
    #[serde(default = "default_screenshots")]
    pub screenshots: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_shortcuts() -> PathBuf {
    PathBuf::from(DEFAULT_SHORTCUTS_PATH)
}
fn default_plugins() -> PathBuf {
    PathBuf::from("plugins")
}
fn default_screenshots() -> PathBuf {
    PathBuf::from(DEFAULT_SCREENSHOT_DIR)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            shortcuts: default_shortcuts(),
            plugins: default_plugins(),
            screenshots: default_screenshots(),
        }
    }
}

impl ShortcutsSource for AppConfig {
    fn shortcuts_path(&self) -> PathBuf {
        self.paths.shortcuts.clone()
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the platform config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(dir.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_or_create_config(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, writing the defaults there first if no
/// file exists yet.  A failed write is logged and the defaults are used.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_or_create_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if path.exists() {
        return load_config_from(path);
    }

    let cfg = AppConfig::default();
    match save_config_to(&cfg, path) {
        Ok(()) => info!("wrote default settings to {}", path.display()),
        Err(e) => warn!("{e}; continuing with default settings"),
    }
    Ok(cfg)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            debug!("loaded config from {}", path.display());
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the `Beacon`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Beacon"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("beacon"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Beacon")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
