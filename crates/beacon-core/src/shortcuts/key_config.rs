//! The parsed `[commands]` section of a shortcut file.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::{ShortcutConfig, ShortcutConfigError};

const COMMANDS_SECTION: &str = "[commands]";

/// Command name to shortcut bindings loaded from a shortcut file.
///
/// A command appearing twice keeps the last binding.  Commands are stored in
/// name order, so [`KeyConfig::configured_commands`] is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyConfig {
    shortcuts: BTreeMap<String, ShortcutConfig>,
}

impl KeyConfig {
    /// Reads and parses the shortcut file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ShortcutConfigError::Open`] if the file cannot be read.
    /// - [`ShortcutConfigError::InvalidFormat`] if an entry lacks a `+`.
    pub fn load(path: &Path) -> Result<Self, ShortcutConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ShortcutConfigError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&text)
    }

    /// Parses shortcut file text.
    ///
    /// Blank lines and lines starting with `;` are skipped, and a `;` after a
    /// value or a section header starts a comment.  Lines before the
    /// `[commands]` header, lines in any later section, and lines without `=`
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcutConfigError::InvalidFormat`] for a `[commands]` entry
    /// whose value has no `+` separator.
    pub fn parse(text: &str) -> Result<Self, ShortcutConfigError> {
        let mut shortcuts = BTreeMap::new();
        let mut in_commands = false;

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let header = line.split_once(';').map_or(line, |(h, _)| h.trim_end());
                if header.ends_with(']') {
                    in_commands = header == COMMANDS_SECTION;
                    continue;
                }
            }

            if !in_commands {
                continue;
            }

            let Some((command, shortcut)) = line.split_once('=') else {
                continue;
            };
            let command = command.trim();
            let mut shortcut = shortcut.trim();

            // Inline comment.
            if let Some(pos) = shortcut.find(';') {
                shortcut = shortcut[..pos].trim_end();
            }

            let Some((modifier, key)) = shortcut.split_once('+') else {
                return Err(ShortcutConfigError::InvalidFormat(command.to_string()));
            };

            let config = ShortcutConfig {
                modifier: modifier.trim().to_string(),
                key: key.trim().to_string(),
            };
            debug!(
                "loaded shortcut for {}: {}+{}",
                command, config.modifier, config.key
            );
            shortcuts.insert(command.to_string(), config);
        }

        Ok(Self { shortcuts })
    }

    /// Returns the binding for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcutConfigError::NotConfigured`] if the command has no
    /// entry.
    pub fn shortcut(&self, command: &str) -> Result<&ShortcutConfig, ShortcutConfigError> {
        self.shortcuts
            .get(command)
            .ok_or_else(|| ShortcutConfigError::NotConfigured(command.to_string()))
    }

    /// Returns `true` if `command` has an entry.
    pub fn has_shortcut(&self, command: &str) -> bool {
        self.shortcuts.contains_key(command)
    }

    /// Every configured command name, each exactly once.
    pub fn configured_commands(&self) -> Vec<String> {
        self.shortcuts.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}
