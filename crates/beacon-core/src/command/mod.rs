//! Commands and the name → constructor registry.
//!
//! # Why a registry? (for beginners)
//!
//! The shortcut file refers to commands by *name* (`toggle`, `stop`,
//! `clear-screenshot`).  The host cannot know every concrete command type at
//! compile time because plugins add new ones at runtime.  The
//! [`CommandRegistry`] therefore stores a *creator* closure per name; asking
//! for a command by name runs the creator and hands back a fresh
//! `Box<dyn Command>` that the caller owns.
//!
//! A missing name is not an error: [`CommandRegistry::command`] returns
//! `None` and the caller decides what that means.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use thiserror::Error;
use tracing::debug;

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command needs the overlay window but the application has none.
    #[error("no window available")]
    NoWindow,

    /// A file system operation performed by the command failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other execution failure.
    #[error("command failed: {0}")]
    Failed(String),
}

/// A unit of behaviour bound to a shortcut.
pub trait Command: Send {
    /// Runs the command.  Called on the keyboard hook thread, so it must not
    /// block for long.
    fn execute(&mut self) -> Result<(), CommandError>;

    /// Whether repeated triggers within the debounce window are suppressed.
    ///
    /// This is a property of the command, not of the shortcut binding.
    fn use_debounce(&self) -> bool;
}

/// Zero-argument constructor stored in the registry.
pub type CommandCreator = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// Process-wide registry of command creators keyed by name.
///
/// Registering an existing name replaces the previous creator, which is what
/// lets a reloaded plugin re-register its commands.
#[derive(Default)]
pub struct CommandRegistry {
    creators: RwLock<HashMap<String, CommandCreator>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `creator` under `name`, replacing any previous entry.
    pub fn register(&self, name: &str, creator: CommandCreator) {
        let replaced = self
            .creators
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), creator)
            .is_some();
        debug!(
            "{} command: {}",
            if replaced { "re-registered" } else { "registered" },
            name
        );
    }

    /// Convenience wrapper around [`CommandRegistry::register`] for closures.
    pub fn register_fn<F>(&self, name: &str, creator: F)
    where
        F: Fn() -> Box<dyn Command> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(creator));
    }

    /// Removes `name`.  Returns `true` if an entry was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self
            .creators
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            debug!("unregistered command: {name}");
        }
        removed
    }

    /// Builds a fresh instance of `name`, or `None` if it is not registered.
    pub fn command(&self, name: &str) -> Option<Box<dyn Command>> {
        // Clone the creator out so it runs without the lock held.
        let creator = self
            .creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()?;
        Some(creator())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the process-wide default registry, created empty on first use.
    pub fn shared() -> Arc<CommandRegistry> {
        Arc::clone(&shared_slot().read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the process-wide default registry.
    pub fn set_shared(registry: Arc<CommandRegistry>) {
        *shared_slot().write().unwrap_or_else(PoisonError::into_inner) = registry;
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn shared_slot() -> &'static RwLock<Arc<CommandRegistry>> {
    static SHARED: OnceLock<RwLock<Arc<CommandRegistry>>> = OnceLock::new();
    SHARED.get_or_init(|| RwLock::new(Arc::new(CommandRegistry::new())))
}
