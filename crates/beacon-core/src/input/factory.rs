//! Input factories: shortcut file + key register → inputs.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::{Input, InputFactoryError, KeyStateQuery, KeyboardInput};
use crate::keymap::{KeyMapper, KeyRegister};
use crate::shortcuts::{write_default_shortcuts, KeyConfig};

/// Default location of the shortcut file, relative to the working directory.
pub const DEFAULT_SHORTCUTS_PATH: &str = "config/shortcuts.ini";

// ── Configuration source ──────────────────────────────────────────────────────

/// Tells an input factory where the shortcut file lives.
pub trait ShortcutsSource: Send + Sync {
    fn shortcuts_path(&self) -> PathBuf;
}

/// Fixed-path source returning [`DEFAULT_SHORTCUTS_PATH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopConfig;

impl ShortcutsSource for DesktopConfig {
    fn shortcuts_path(&self) -> PathBuf {
        PathBuf::from(DEFAULT_SHORTCUTS_PATH)
    }
}

impl ShortcutsSource for PathBuf {
    fn shortcuts_path(&self) -> PathBuf {
        self.clone()
    }
}

// ── Factory trait ─────────────────────────────────────────────────────────────

/// Produces ready-to-use [`Input`]s for configured command names.
///
/// Every query method fails with [`InputFactoryError::NotInitialized`] until
/// [`InputFactory::initialize`] has succeeded.
pub trait InputFactory: Send {
    /// Loads (or first generates) the shortcut configuration.
    fn initialize(&mut self) -> Result<(), InputFactoryError>;

    /// Builds the input bound to `command`'s shortcut.
    fn create_input(&self, command: &str) -> Result<Box<dyn Input>, InputFactoryError>;

    fn has_shortcut(&self, command: &str) -> Result<bool, InputFactoryError>;

    fn configured_commands(&self) -> Result<Vec<String>, InputFactoryError>;
}

// ── Keyboard factory ──────────────────────────────────────────────────────────

/// The canonical factory: one shortcut file, resolved against a key register.
pub struct KeyboardInputFactory {
    source: Arc<dyn ShortcutsSource>,
    register: Arc<KeyRegister>,
    state: Arc<dyn KeyStateQuery>,
    key_config: Option<KeyConfig>,
}

impl KeyboardInputFactory {
    /// Creates an uninitialized factory.
    ///
    /// `state` is the key-state query every created input consults.
    pub fn new(
        source: Arc<dyn ShortcutsSource>,
        register: Arc<KeyRegister>,
        state: Arc<dyn KeyStateQuery>,
    ) -> Self {
        Self {
            source,
            register,
            state,
            key_config: None,
        }
    }

    fn config(&self) -> Result<&KeyConfig, InputFactoryError> {
        self.key_config
            .as_ref()
            .ok_or(InputFactoryError::NotInitialized)
    }
}

impl InputFactory for KeyboardInputFactory {
    fn initialize(&mut self) -> Result<(), InputFactoryError> {
        let path = self.source.shortcuts_path();
        if !path.exists() {
            info!(
                "shortcut file {} not found; writing defaults",
                path.display()
            );
            write_default_shortcuts(&path)?;
        }

        let config = KeyConfig::load(&path)?;
        info!(
            "loaded {} shortcut(s) from {}",
            config.len(),
            path.display()
        );
        self.key_config = Some(config);
        Ok(())
    }

    fn create_input(&self, command: &str) -> Result<Box<dyn Input>, InputFactoryError> {
        let shortcut = self.config()?.shortcut(command)?;

        let invalid = |source| InputFactoryError::InvalidShortcut {
            command: command.to_string(),
            source,
        };
        let key_code = KeyMapper::key_code(&self.register, &shortcut.key).map_err(invalid)?;
        let modifier_code =
            KeyMapper::modifier_code(&self.register, &shortcut.modifier).map_err(invalid)?;
        let pressed_mask = self.register.pressed_mask().map_err(invalid)?;

        debug!(
            "created input for {}: {}+{}",
            command, shortcut.modifier, shortcut.key
        );
        Ok(Box::new(KeyboardInput::new(
            key_code,
            modifier_code,
            pressed_mask,
            Arc::clone(&self.state),
        )))
    }

    fn has_shortcut(&self, command: &str) -> Result<bool, InputFactoryError> {
        Ok(self.config()?.has_shortcut(command))
    }

    fn configured_commands(&self) -> Result<Vec<String>, InputFactoryError> {
        Ok(self.config()?.configured_commands())
    }
}

// ── Composite factory ─────────────────────────────────────────────────────────

/// Ordered list of factories queried as one.
///
/// - `create_input` returns the first sub-factory success.
/// - `has_shortcut` is true if any sub-factory has the command.
/// - `configured_commands` concatenates every sub-factory's list without
///   de-duplication.
#[derive(Default)]
pub struct CompositeInputFactory {
    factories: Vec<Box<dyn InputFactory>>,
}

impl CompositeInputFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sub-factory; builder style.
    pub fn with(mut self, factory: Box<dyn InputFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn push(&mut self, factory: Box<dyn InputFactory>) {
        self.factories.push(factory);
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl InputFactory for CompositeInputFactory {
    fn initialize(&mut self) -> Result<(), InputFactoryError> {
        for factory in &mut self.factories {
            factory.initialize()?;
        }
        Ok(())
    }

    fn create_input(&self, command: &str) -> Result<Box<dyn Input>, InputFactoryError> {
        for (index, factory) in self.factories.iter().enumerate() {
            match factory.create_input(command) {
                Ok(input) => return Ok(input),
                Err(e) => debug!("sub-factory {index} cannot build {command}: {e}"),
            }
        }
        Err(InputFactoryError::NoCommandFound(command.to_string()))
    }

    fn has_shortcut(&self, command: &str) -> Result<bool, InputFactoryError> {
        for factory in &self.factories {
            if factory.has_shortcut(command)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn configured_commands(&self) -> Result<Vec<String>, InputFactoryError> {
        let mut commands = Vec::new();
        for factory in &self.factories {
            commands.extend(factory.configured_commands()?);
        }
        Ok(commands)
    }
}
