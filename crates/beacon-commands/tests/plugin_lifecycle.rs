//! Drives the plugin through its exported C entry points, the way the host's
//! loader does, against a recording application.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use beacon_commands::{CLEAR_SCREENSHOT, COMMAND_NAMES, TOGGLE_TRANSPARENCY};
use beacon_core::app::OPAQUE;
use beacon_core::plugin::{CreatePluginFn, DestroyPluginFn};
use beacon_core::{Application, CommandRegistry, OverlayWindow, PluginContext};
use uuid::Uuid;

struct Window {
    alpha: AtomicU8,
    anonymous: AtomicBool,
}

impl OverlayWindow for Window {
    fn is_visible(&self) -> bool {
        true
    }

    fn set_visible(&self, _visible: bool) {}

    fn transparency(&self) -> u8 {
        self.alpha.load(Ordering::SeqCst)
    }

    fn set_transparency(&self, alpha: u8) {
        self.alpha.store(alpha, Ordering::SeqCst);
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous.load(Ordering::SeqCst)
    }

    fn set_anonymous(&self, anonymous: bool) {
        self.anonymous.store(anonymous, Ordering::SeqCst);
    }
}

struct App {
    window: Arc<Window>,
    screenshots: PathBuf,
}

impl Application for App {
    fn quit(&self) {}

    fn window(&self) -> Option<Arc<dyn OverlayWindow>> {
        Some(Arc::clone(&self.window) as Arc<dyn OverlayWindow>)
    }

    fn screenshot_dir(&self) -> PathBuf {
        self.screenshots.clone()
    }
}

#[test]
fn test_plugin_registers_runs_and_unregisters_commands() {
    // Arrange
    let screenshots = std::env::temp_dir().join(format!("beacon_test_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&screenshots).unwrap();
    std::fs::write(screenshots.join("shot.png"), b"png").unwrap();
    let window = Arc::new(Window {
        alpha: AtomicU8::new(OPAQUE),
        anonymous: AtomicBool::new(false),
    });
    let app = Arc::new(App {
        window: Arc::clone(&window),
        screenshots: screenshots.clone(),
    });
    let ctx = PluginContext::new(Arc::new(CommandRegistry::new()), app);
    let create: CreatePluginFn = beacon_commands::createPlugin;
    let destroy: DestroyPluginFn = beacon_commands::destroyPlugin;

    // SAFETY: the pointer comes from `createPlugin` and is released exactly
    // once through `destroyPlugin`.
    unsafe {
        let raw = create();
        assert!(!raw.is_null());
        let plugin = &mut *raw;

        // Act
        assert!(plugin.initialize(&ctx));
        let registered = ctx.commands.names();
        ctx.commands
            .command(TOGGLE_TRANSPARENCY)
            .unwrap()
            .execute()
            .unwrap();
        ctx.commands
            .command(CLEAR_SCREENSHOT)
            .unwrap()
            .execute()
            .unwrap();
        plugin.shutdown(&ctx);
        destroy(raw);

        // Assert
        let mut expected: Vec<String> = COMMAND_NAMES.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(registered, expected);
    }

    assert_eq!(window.transparency(), beacon_commands::commands::DIMMED);
    assert!(!screenshots.join("shot.png").exists());
    assert!(ctx.commands.is_empty());
    std::fs::remove_dir_all(&screenshots).ok();
}

#[test]
fn test_plugin_reports_name_and_crate_version() {
    use beacon_core::Plugin;

    let plugin = beacon_commands::CommandsPlugin;

    assert_eq!(plugin.name(), "Commands Plugin");
    assert_eq!(plugin.version(), env!("CARGO_PKG_VERSION"));
}
