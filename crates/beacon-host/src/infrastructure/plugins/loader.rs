//! Opening plugin libraries and owning the objects they create.

use std::path::Path;
use std::ptr::NonNull;

use beacon_core::plugin::{
    CreatePluginFn, DestroyPluginFn, CREATE_PLUGIN_SYMBOL, DESTROY_PLUGIN_SYMBOL,
};
use beacon_core::{Plugin, PluginBox};
use libloading::Library;
use tracing::{debug, warn};

use super::PluginError;

/// Produces plugins from files.  Never fails outward: anything that cannot
/// be loaded is logged and reported as `None`.
pub trait PluginSource {
    fn load(&self, path: &Path) -> Option<LoadedPlugin>;
}

impl<F> PluginSource for F
where
    F: Fn(&Path) -> Option<LoadedPlugin>,
{
    fn load(&self, path: &Path) -> Option<LoadedPlugin> {
        self(path)
    }
}

// ── Loaded plugin ─────────────────────────────────────────────────────────────

/// A plugin object from a shared library, plus the library itself.
struct LibraryPlugin {
    plugin: NonNull<PluginBox>,
    destroy: DestroyPluginFn,
    // Dropped after `Drop::drop` has handed the object back to the library.
    _library: Library,
}

impl Drop for LibraryPlugin {
    fn drop(&mut self) {
        // SAFETY: `plugin` came from this library's `createPlugin` and is
        // handed to its `destroyPlugin` exactly once, while the library is
        // still loaded.
        unsafe { (self.destroy)(self.plugin.as_ptr()) };
    }
}

enum Owned {
    Library(LibraryPlugin),
    InProcess(PluginBox),
}

/// A plugin the manager owns.
///
/// Dropping a library-backed plugin calls the library's `destroyPlugin` and
/// only then unloads the library.
pub struct LoadedPlugin {
    owned: Owned,
}

impl LoadedPlugin {
    /// Wraps a plugin compiled into the host (or a test).
    pub fn in_process(plugin: PluginBox) -> Self {
        Self {
            owned: Owned::InProcess(plugin),
        }
    }

    pub fn plugin(&self) -> &dyn Plugin {
        match &self.owned {
            // SAFETY: the pointer stays valid until `LibraryPlugin::drop`.
            Owned::Library(lib) => unsafe { &**lib.plugin.as_ref() },
            Owned::InProcess(plugin) => plugin.as_ref(),
        }
    }

    pub fn plugin_mut(&mut self) -> &mut dyn Plugin {
        match &mut self.owned {
            // SAFETY: as above; `&mut self` guarantees exclusive access.
            Owned::Library(lib) => unsafe { &mut **lib.plugin.as_mut() },
            Owned::InProcess(plugin) => plugin.as_mut(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.owned, Owned::Library(_))
    }
}

// ── Dynamic library loader ────────────────────────────────────────────────────

/// Loads plugins from shared libraries exporting `createPlugin` and
/// `destroyPlugin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibLoader;

impl DylibLoader {
    fn open(path: &Path) -> Result<LoadedPlugin, PluginError> {
        let load_failed = |reason: String| PluginError::LoadFailed {
            path: path.to_path_buf(),
            reason,
        };

        // SAFETY: opening a library runs its initialisers.  Plugins are
        // trusted code installed next to the host.
        let library = unsafe { Library::new(path) }.map_err(|e| load_failed(e.to_string()))?;

        // SAFETY: the symbol types match what `export_plugin!` generates.
        // The copied fn pointers are only used while `library` is alive.
        let (create, destroy) = unsafe {
            let create = library
                .get::<CreatePluginFn>(CREATE_PLUGIN_SYMBOL)
                .map_err(|e| load_failed(format!("missing createPlugin: {e}")))?;
            let destroy = library
                .get::<DestroyPluginFn>(DESTROY_PLUGIN_SYMBOL)
                .map_err(|e| load_failed(format!("missing destroyPlugin: {e}")))?;
            (*create, *destroy)
        };

        // SAFETY: `createPlugin` takes no arguments and returns an owned
        // pointer or null.
        let raw = unsafe { create() };
        let plugin =
            NonNull::new(raw).ok_or_else(|| load_failed("createPlugin returned null".to_string()))?;

        Ok(LoadedPlugin {
            owned: Owned::Library(LibraryPlugin {
                plugin,
                destroy,
                _library: library,
            }),
        })
    }
}

impl PluginSource for DylibLoader {
    fn load(&self, path: &Path) -> Option<LoadedPlugin> {
        match Self::open(path) {
            Ok(plugin) => {
                debug!("opened plugin library {}", path.display());
                Some(plugin)
            }
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }
}
