//! # beacon-commands
//!
//! The plugin bundled with Beacon.  Built as a `cdylib`, it is dropped into
//! the host's `plugins/` folder and loaded at startup.
//!
//! | Command                   | Effect                                | Debounced |
//! |---------------------------|---------------------------------------|-----------|
//! | `toggle-transparency`     | overlay alpha 100 ⇄ 255               | yes       |
//! | `toggle-window-anonymity` | hide the overlay from screen capture  | yes       |
//! | `clear-screenshot`        | delete files in the screenshot folder | no        |
//!
//! Commands are registered on `initialize` and unregistered on `shutdown`,
//! so unloading the plugin leaves no creator pointing into freed code.
//! `initialize` also routes this library's `tracing` output to the host's
//! subscriber.

pub mod commands;

use std::sync::Arc;

use beacon_core::{Command, Plugin, PluginContext};
use tracing::info;

use commands::{ClearScreenshotCommand, ToggleTransparencyCommand, ToggleWindowAnonymityCommand};

pub const TOGGLE_TRANSPARENCY: &str = "toggle-transparency";
pub const TOGGLE_WINDOW_ANONYMITY: &str = "toggle-window-anonymity";
pub const CLEAR_SCREENSHOT: &str = "clear-screenshot";

/// Every command name this plugin owns.
pub const COMMAND_NAMES: &[&str] = &[TOGGLE_TRANSPARENCY, TOGGLE_WINDOW_ANONYMITY, CLEAR_SCREENSHOT];

#[derive(Debug, Default)]
pub struct CommandsPlugin;

impl Plugin for CommandsPlugin {
    fn initialize(&mut self, ctx: &PluginContext) -> bool {
        ctx.forward_logs();

        let app = Arc::clone(&ctx.app);
        ctx.commands.register_fn(TOGGLE_TRANSPARENCY, move || {
            Box::new(ToggleTransparencyCommand::new(Arc::clone(&app))) as Box<dyn Command>
        });

        let app = Arc::clone(&ctx.app);
        ctx.commands.register_fn(TOGGLE_WINDOW_ANONYMITY, move || {
            Box::new(ToggleWindowAnonymityCommand::new(Arc::clone(&app))) as Box<dyn Command>
        });

        let app = Arc::clone(&ctx.app);
        ctx.commands.register_fn(CLEAR_SCREENSHOT, move || {
            Box::new(ClearScreenshotCommand::new(app.screenshot_dir())) as Box<dyn Command>
        });

        info!("{} v{} registered {} command(s)", self.name(), self.version(), COMMAND_NAMES.len());
        true
    }

    fn shutdown(&mut self, ctx: &PluginContext) {
        for name in COMMAND_NAMES {
            ctx.commands.unregister(name);
        }
    }

    fn name(&self) -> String {
        "Commands Plugin".to_string()
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

beacon_core::export_plugin!(CommandsPlugin);
