//! The shortcut document written on first run.

use std::io::Write;
use std::path::Path;

use tracing::info;

use super::ShortcutConfigError;

#[cfg(target_os = "windows")]
const DEFAULT_SHORTCUTS: &str = "\
; Default keyboard shortcuts configuration
; Format: command = modifier+key
; Available modifiers: Ctrl, Alt, Shift, Win (Windows) / Cmd (macOS)

[commands]
toggle = Ctrl+Num 1    ; Toggle window visibility
stop = Win+/        ; Stop application
toggle-transparency = Ctrl+Num 3    ; Toggle window transparency
toggle-window-anonymity = Ctrl+Num 4    ; Toggle window anonymity
clear-screenshot = Ctrl+Num 9    ; Clear screenshot folder

";

#[cfg(not(target_os = "windows"))]
const DEFAULT_SHORTCUTS: &str = "\
; Default keyboard shortcuts configuration
; Format: command = modifier+key
; Available modifiers: Ctrl, Alt, Shift, Win (Windows) / Cmd (macOS)

[commands]
toggle = Ctrl+F1    ; Toggle window visibility
stop = Cmd+/        ; Stop application

";

/// Returns the default shortcut document for the compile target.
pub fn default_shortcuts() -> &'static str {
    DEFAULT_SHORTCUTS
}

/// Writes [`default_shortcuts`] to `path`, creating parent directories.
///
/// An existing file is overwritten; callers check for existence first.
///
/// # Errors
///
/// - [`ShortcutConfigError::Create`] if the directory or file cannot be created.
/// - [`ShortcutConfigError::Write`] if writing the document fails.
pub fn write_default_shortcuts(path: &Path) -> Result<(), ShortcutConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ShortcutConfigError::Create {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut file = std::fs::File::create(path).map_err(|e| ShortcutConfigError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(DEFAULT_SHORTCUTS.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ShortcutConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("wrote default shortcut configuration to {}", path.display());
    Ok(())
}
