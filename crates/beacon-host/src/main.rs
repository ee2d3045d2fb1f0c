//! Beacon host entry point.
//!
//! Wires the dispatch core to the OS and runs the message loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ AppConfig            -- TOML settings, CLI overrides
//!  └─ KeyRegister          -- platform key table
//!  └─ CommandRegistry      -- built-ins: toggle, stop
//!  └─ PluginManager        -- plugins/ scanned, every plugin initialized
//!  └─ KeyboardSignalManager
//!       ├─ keyboard hook installed (this thread)
//!       └─ start_signals   -- shortcuts.ini written if missing, then loaded
//!  └─ message loop         -- until `stop` or Ctrl-C
//!  └─ teardown             -- hook removed, then plugins shut down
//! ```
//!
//! Any configuration error before the loop starts is fatal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use beacon_core::{
    Application, CommandRegistry, KeyRegister, KeyboardInputFactory, KeyboardSignalFactory,
    KeyboardSignalManager, PluginContext,
};
use beacon_host::application::builtin_commands::register_builtin_commands;
use beacon_host::application::host_app::{HostApplication, QuitHandle};
use beacon_host::infrastructure::keyboard_hook::{platform_hook, platform_key_state};
use beacon_host::infrastructure::message_loop::{run_message_loop, spawn_ctrl_c_listener};
use beacon_host::infrastructure::plugins::PluginManager;
use beacon_host::infrastructure::storage::config::{self, AppConfig, ConfigError};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Beacon: global keyboard shortcuts for a desktop overlay.
#[derive(Debug, Parser)]
#[command(name = "beacon", about = "Global shortcut host for the Beacon overlay", version)]
struct Cli {
    /// Settings file.  Defaults to the platform config directory.
    #[arg(long, env = "BEACON_CONFIG")]
    config: Option<PathBuf>,

    /// Shortcut bindings file, overriding `[paths] shortcuts`.
    #[arg(long)]
    shortcuts: Option<PathBuf>,

    /// Plugin directory, overriding `[paths] plugins`.
    #[arg(long)]
    plugins: Option<PathBuf>,

    /// Log filter, overriding both `RUST_LOG` and `[general] log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Loads the settings file and applies the path overrides.
    fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => config::load_config_from(path)?,
            None => match config::load_config() {
                Err(ConfigError::NoPlatformConfigDir) => AppConfig::default(),
                other => other?,
            },
        };
        if let Some(shortcuts) = &self.shortcuts {
            cfg.paths.shortcuts = shortcuts.clone();
        }
        if let Some(plugins) = &self.plugins {
            cfg.paths.plugins = plugins.clone();
        }
        Ok(cfg)
    }
}

/// `--log-level`, then `RUST_LOG`, then the config file.
fn env_filter(cli_level: Option<&str>, config_level: &str) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = cli.load_config().context("failed to load Beacon settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.log_level.as_deref(), &cfg.general.log_level))
        .init();

    info!("Beacon starting");
    debug!(
        "shortcuts: {}, plugins: {}, screenshots: {}",
        cfg.paths.shortcuts.display(),
        cfg.paths.plugins.display(),
        cfg.paths.screenshots.display()
    );

    // ── Core registries ───────────────────────────────────────────────────────
    let register = KeyRegister::shared();
    let key_state = platform_key_state(&register);
    let commands = CommandRegistry::shared();

    let quit = Arc::new(QuitHandle::new());
    let app: Arc<dyn Application> = Arc::new(
        HostApplication::new(Arc::clone(&quit)).with_screenshot_dir(&cfg.paths.screenshots),
    );
    register_builtin_commands(&commands, Arc::clone(&app));

    // ── Plugins ───────────────────────────────────────────────────────────────
    std::fs::create_dir_all(&cfg.paths.plugins).with_context(|| {
        format!("failed to create plugin directory {}", cfg.paths.plugins.display())
    })?;
    let mut plugins = PluginManager::new(PluginContext::new(Arc::clone(&commands), app));
    plugins
        .setup_from_directory(&cfg.paths.plugins)
        .context("failed to set up plugins")?;

    // ── Signals ───────────────────────────────────────────────────────────────
    let inputs = KeyboardInputFactory::new(Arc::new(cfg.clone()), register, key_state.query);
    let signals = KeyboardSignalFactory::new(Box::new(inputs), Arc::clone(&commands));
    let manager = KeyboardSignalManager::new(Arc::new(signals), platform_hook())
        .with_key_tracker(key_state.tracker);
    manager
        .start_signals()
        .context("failed to build signals from shortcut configuration")?;

    if !manager.is_hook_installed() {
        warn!("running without a global keyboard hook; shortcuts will not fire");
    }

    if let Err(e) = spawn_ctrl_c_listener(Arc::clone(&quit)) {
        warn!("Ctrl-C handler unavailable: {e}");
    }

    info!("Beacon ready with {} signal(s)", manager.signal_count());
    run_message_loop(&quit);

    // Signals hold commands built by plugin code; release them (and the
    // hook) before any plugin library is unloaded.
    drop(manager);
    plugins.shutdown_all();

    info!("Beacon stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
