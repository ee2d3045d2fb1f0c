//! The binary interface between the host and a plugin library.
//!
//! # How a plugin is loaded (for beginners)
//!
//! A plugin is a shared library (`.dll`, `.so`, `.dylib`) that exports two
//! unmangled C symbols:
//!
//! - `createPlugin() -> *mut PluginBox` allocates the plugin object *inside
//!   the library* and hands the host an opaque pointer.
//! - `destroyPlugin(*mut PluginBox)` frees that object, again inside the
//!   library, so the allocator that created it is the one that releases it.
//!
//! The host never frees a plugin pointer itself.  [`export_plugin!`] generates
//! both functions for a type implementing [`Plugin`].
//!
//! `PluginBox` is a Rust trait object, so host and plugin must be built with
//! the same compiler and the same `beacon-core` version.
//!
//! # No globals across the boundary
//!
//! A dynamic library gets its own copy of every `static`, so a plugin cannot
//! reach the host's command registry through a global.  Instead the host
//! passes a [`PluginContext`] to [`Plugin::initialize`] and
//! [`Plugin::shutdown`].
//!
//! The same holds for `tracing`: a plugin library links its own copy, whose
//! global dispatcher starts out empty.  The context carries the host's
//! dispatcher, and [`PluginContext::forward_logs`] installs it in the
//! plugin's copy.

use std::sync::Arc;

use tracing::Dispatch;

use crate::app::Application;
use crate::command::CommandRegistry;

/// Host services handed to a plugin.
#[derive(Clone)]
pub struct PluginContext {
    /// Registry the plugin adds its commands to.
    pub commands: Arc<CommandRegistry>,
    /// The running application, for commands that act on the window.
    pub app: Arc<dyn Application>,
    /// The host's log dispatcher, captured when the context was created.
    pub log_dispatch: Dispatch,
}

impl PluginContext {
    /// Captures the dispatcher that is current on the calling thread, so
    /// create the context after the host's subscriber is installed.
    pub fn new(commands: Arc<CommandRegistry>, app: Arc<dyn Application>) -> Self {
        Self {
            commands,
            app,
            log_dispatch: tracing::dispatcher::get_default(Dispatch::clone),
        }
    }

    /// Makes the host's dispatcher the global default of the `tracing` copy
    /// this code is linked against.  Call it first in [`Plugin::initialize`].
    ///
    /// Returns `false` if that copy already had a global default, which is
    /// the case for a plugin compiled into the host itself.
    pub fn forward_logs(&self) -> bool {
        let installed = tracing::dispatcher::set_global_default(self.log_dispatch.clone()).is_ok();
        // Callsites seen before the dispatcher was set cached "never".
        tracing::callsite::rebuild_interest_cache();
        installed
    }
}

/// A dynamically loaded extension contributing commands.
///
/// By convention `initialize` registers every command the plugin provides and
/// `shutdown` unregisters the same names.
pub trait Plugin: Send {
    /// Returns `false` if the plugin could not set itself up.
    fn initialize(&mut self, ctx: &PluginContext) -> bool;

    fn shutdown(&mut self, ctx: &PluginContext);

    /// Unique name; the manager rejects a second plugin with the same name.
    fn name(&self) -> String;

    fn version(&self) -> String;
}

/// The object `createPlugin` returns a pointer to.
pub type PluginBox = Box<dyn Plugin>;

/// Signature of the exported `createPlugin` symbol.
#[allow(improper_ctypes_definitions)]
pub type CreatePluginFn = unsafe extern "C" fn() -> *mut PluginBox;

/// Signature of the exported `destroyPlugin` symbol.
#[allow(improper_ctypes_definitions)]
pub type DestroyPluginFn = unsafe extern "C" fn(*mut PluginBox);

/// NUL-terminated name of the creation entry point.
pub const CREATE_PLUGIN_SYMBOL: &[u8] = b"createPlugin\0";

/// NUL-terminated name of the destruction entry point.
pub const DESTROY_PLUGIN_SYMBOL: &[u8] = b"destroyPlugin\0";

/// Exports `createPlugin` / `destroyPlugin` for a plugin type.
///
/// ```ignore
/// beacon_core::export_plugin!(CommandsPlugin);                       // uses Default
/// beacon_core::export_plugin!(CommandsPlugin, CommandsPlugin::new());
/// ```
///
/// A panic inside the constructor is caught and reported to the host as a
/// null pointer.
#[macro_export]
macro_rules! export_plugin {
    ($plugin:ty) => {
        $crate::export_plugin!($plugin, <$plugin as ::core::default::Default>::default());
    };
    ($plugin:ty, $ctor:expr) => {
        #[no_mangle]
        #[allow(non_snake_case, improper_ctypes_definitions)]
        pub extern "C" fn createPlugin() -> *mut $crate::plugin::PluginBox {
            match ::std::panic::catch_unwind(|| {
                let plugin: $crate::plugin::PluginBox = ::std::boxed::Box::new($ctor);
                plugin
            }) {
                Ok(plugin) => ::std::boxed::Box::into_raw(::std::boxed::Box::new(plugin)),
                Err(_) => ::std::ptr::null_mut(),
            }
        }

        #[no_mangle]
        #[allow(non_snake_case, improper_ctypes_definitions)]
        pub unsafe extern "C" fn destroyPlugin(plugin: *mut $crate::plugin::PluginBox) {
            if !plugin.is_null() {
                // SAFETY: `plugin` was produced by `createPlugin` above via
                // `Box::into_raw` and the host passes it back exactly once.
                drop(unsafe { ::std::boxed::Box::from_raw(plugin) });
            }
        }
    };
}
