//! Ownership and lifecycle of every loaded plugin.

use std::path::Path;

use beacon_core::PluginContext;
use tracing::{debug, error, info, warn};

use super::loader::{DylibLoader, LoadedPlugin, PluginSource};
use super::{has_plugin_extension, PluginError};

/// Loads, initializes and shuts down plugins, keyed by plugin name.
///
/// Plugins are kept in load order.  Dropping the manager shuts every plugin
/// down.
pub struct PluginManager<S: PluginSource = DylibLoader> {
    source: S,
    ctx: PluginContext,
    plugins: Vec<LoadedPlugin>,
}

impl PluginManager<DylibLoader> {
    pub fn new(ctx: PluginContext) -> Self {
        Self::with_source(DylibLoader, ctx)
    }
}

impl<S: PluginSource> PluginManager<S> {
    pub fn with_source(source: S, ctx: PluginContext) -> Self {
        Self {
            source,
            ctx,
            plugins: Vec::new(),
        }
    }

    /// The context handed to every plugin.
    pub fn context(&self) -> &PluginContext {
        &self.ctx
    }

    /// Loads one plugin file.  The plugin is not initialized.
    ///
    /// Returns `false` if the file could not be loaded or a plugin with the
    /// same name is already present.
    pub fn load_plugin(&mut self, path: &Path) -> bool {
        let Some(loaded) = self.source.load(path) else {
            return false;
        };

        let name = loaded.plugin().name();
        if self.position(&name).is_some() {
            warn!("plugin {name} already loaded; ignoring {}", path.display());
            return false;
        }

        info!(
            "loaded {} plugin {name} v{} from {}",
            if loaded.is_dynamic() { "library" } else { "in-process" },
            loaded.plugin().version(),
            path.display()
        );
        self.plugins.push(loaded);
        true
    }

    /// Loads every plugin library directly inside `dir`.
    ///
    /// Files without a plugin extension are skipped silently.  Returns the
    /// number of plugins loaded.
    pub fn load_plugins_from_directory(&mut self, dir: &Path) -> usize {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot read plugin directory {}: {e}", dir.display());
                return 0;
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_plugin_extension(path))
            .collect();
        paths.sort();

        let loaded = paths.iter().filter(|path| self.load_plugin(path)).count();
        debug!("loaded {loaded} of {} plugin file(s) from {}", paths.len(), dir.display());
        loaded
    }

    /// Shuts down and destroys the plugin called `name`.
    pub fn unload_plugin(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        let mut loaded = self.plugins.remove(index);
        loaded.plugin_mut().shutdown(&self.ctx);
        drop(loaded);
        info!("unloaded plugin {name}");
        true
    }

    /// Initializes every loaded plugin.
    ///
    /// Every plugin is attempted even after a failure.  Returns `true` only if
    /// all of them succeeded.
    pub fn initialize_all(&mut self) -> bool {
        self.initialize_each().is_empty()
    }

    /// Loads every plugin in `dir` and initializes them all.
    ///
    /// # Errors
    ///
    /// [`PluginError::DirectoryMissing`] if `dir` does not exist, and
    /// [`PluginError::InitializationFailed`] naming every plugin whose
    /// `initialize` returned `false`.
    pub fn setup_from_directory(&mut self, dir: &Path) -> Result<usize, PluginError> {
        if !dir.is_dir() {
            return Err(PluginError::DirectoryMissing(dir.to_path_buf()));
        }

        let loaded = self.load_plugins_from_directory(dir);
        let failed = self.initialize_each();
        if !failed.is_empty() {
            return Err(PluginError::InitializationFailed(failed));
        }
        info!("{loaded} plugin(s) ready");
        Ok(loaded)
    }

    /// Shuts down and destroys every plugin, most recently loaded first.
    pub fn shutdown_all(&mut self) {
        while let Some(mut loaded) = self.plugins.pop() {
            let name = loaded.plugin().name();
            loaded.plugin_mut().shutdown(&self.ctx);
            drop(loaded);
            debug!("shut down plugin {name}");
        }
    }

    /// Names of the loaded plugins, in load order.
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.plugin().name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|p| p.plugin().name() == name)
    }

    /// Returns the names of the plugins that failed.
    fn initialize_each(&mut self) -> Vec<String> {
        let mut failed = Vec::new();
        for loaded in self.plugins.iter_mut() {
            let plugin = loaded.plugin_mut();
            if plugin.initialize(&self.ctx) {
                debug!("initialized plugin {}", plugin.name());
            } else {
                error!("plugin {} failed to initialize", plugin.name());
                failed.push(plugin.name());
            }
        }
        failed
    }
}

impl<S: PluginSource> Drop for PluginManager<S> {
    fn drop(&mut self) {
        self.shutdown_all();
    }
}
