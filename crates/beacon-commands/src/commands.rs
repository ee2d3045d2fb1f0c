//! The commands this plugin contributes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use beacon_core::app::OPAQUE;
use beacon_core::{Application, Command, CommandError};
use tracing::{debug, info, warn};

/// Alpha the overlay is dimmed to.
pub const DIMMED: u8 = 100;

// ── toggle-transparency ───────────────────────────────────────────────────────

/// Switches the overlay between dimmed and fully opaque.
///
/// Only an overlay that is exactly [`DIMMED`] goes back to opaque; any other
/// alpha is dimmed.
pub struct ToggleTransparencyCommand {
    app: Arc<dyn Application>,
}

impl ToggleTransparencyCommand {
    pub fn new(app: Arc<dyn Application>) -> Self {
        Self { app }
    }
}

impl Command for ToggleTransparencyCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let window = self.app.window().ok_or(CommandError::NoWindow)?;
        let alpha = if window.transparency() == DIMMED {
            OPAQUE
        } else {
            DIMMED
        };
        window.set_transparency(alpha);
        debug!("overlay transparency set to {alpha}");
        Ok(())
    }

    fn use_debounce(&self) -> bool {
        true
    }
}

// ── toggle-window-anonymity ───────────────────────────────────────────────────

/// Hides the overlay from screen capture, or shows it again.
pub struct ToggleWindowAnonymityCommand {
    app: Arc<dyn Application>,
}

impl ToggleWindowAnonymityCommand {
    pub fn new(app: Arc<dyn Application>) -> Self {
        Self { app }
    }
}

impl Command for ToggleWindowAnonymityCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let window = self.app.window().ok_or(CommandError::NoWindow)?;
        window.toggle_anonymity();
        debug!("overlay anonymous: {}", window.is_anonymous());
        Ok(())
    }

    fn use_debounce(&self) -> bool {
        true
    }
}

// ── clear-screenshot ──────────────────────────────────────────────────────────

/// Deletes every regular file in the screenshot folder.
///
/// Subdirectories are left alone.  A missing folder is not an error, and
/// file-system failures are logged rather than returned: a half-cleared
/// folder is still a useful result.
pub struct ClearScreenshotCommand {
    folder: PathBuf,
}

impl ClearScreenshotCommand {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Returns the number of files deleted.
    pub fn clear_folder(&self) -> usize {
        let entries = match std::fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("screenshot folder does not exist: {}", self.folder.display());
                return 0;
            }
            Err(e) => {
                warn!("cannot read screenshot folder {}: {e}", self.folder.display());
                return 0;
            }
        };

        let mut deleted = 0;
        for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
            if !path.is_file() {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                Err(e) => warn!("failed to delete {}: {e}", path.display()),
            }
        }
        info!("cleared {deleted} screenshot(s) from {}", self.folder.display());
        deleted
    }
}

impl Command for ClearScreenshotCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.clear_folder();
        Ok(())
    }

    fn use_debounce(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::OverlayWindow;
    use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    struct FakeWindow {
        alpha: AtomicU8,
        anonymous: AtomicBool,
    }

    impl OverlayWindow for FakeWindow {
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

    struct FakeApp {
        window: Option<Arc<FakeWindow>>,
    }

    impl Application for FakeApp {
        fn quit(&self) {}

        fn window(&self) -> Option<Arc<dyn OverlayWindow>> {
            self.window
                .as_ref()
                .map(|w| Arc::clone(w) as Arc<dyn OverlayWindow>)
        }
    }

    fn app_with_alpha(alpha: u8) -> (Arc<FakeApp>, Arc<FakeWindow>) {
        let window = Arc::new(FakeWindow::default());
        window.set_transparency(alpha);
        let app = Arc::new(FakeApp {
            window: Some(Arc::clone(&window)),
        });
        (app, window)
    }

    // ── toggle-transparency ───────────────────────────────────────────────────

    #[test]
    fn test_toggle_transparency_dims_opaque_window() {
        // Arrange
        let (app, window) = app_with_alpha(OPAQUE);
        let mut command = ToggleTransparencyCommand::new(app);

        // Act
        command.execute().unwrap();

        // Assert
        assert_eq!(window.transparency(), DIMMED);
    }

    #[test]
    fn test_toggle_transparency_restores_dimmed_window() {
        let (app, window) = app_with_alpha(DIMMED);
        let mut command = ToggleTransparencyCommand::new(app);

        command.execute().unwrap();

        assert_eq!(window.transparency(), OPAQUE);
    }

    #[test]
    fn test_toggle_transparency_dims_any_other_alpha() {
        let (app, window) = app_with_alpha(0);
        let mut command = ToggleTransparencyCommand::new(app);

        command.execute().unwrap();

        assert_eq!(window.transparency(), DIMMED);
    }

    #[test]
    fn test_window_commands_fail_without_window() {
        let app: Arc<dyn Application> = Arc::new(FakeApp { window: None });

        assert!(matches!(
            ToggleTransparencyCommand::new(Arc::clone(&app)).execute(),
            Err(CommandError::NoWindow)
        ));
        assert!(matches!(
            ToggleWindowAnonymityCommand::new(app).execute(),
            Err(CommandError::NoWindow)
        ));
    }

    // ── toggle-window-anonymity ───────────────────────────────────────────────

    #[test]
    fn test_toggle_window_anonymity_flips_flag() {
        let (app, window) = app_with_alpha(OPAQUE);
        let mut command = ToggleWindowAnonymityCommand::new(app);

        command.execute().unwrap();
        assert!(window.is_anonymous());
        command.execute().unwrap();
        assert!(!window.is_anonymous());
    }

    #[test]
    fn test_window_commands_are_debounced() {
        let (app, _) = app_with_alpha(OPAQUE);
        assert!(ToggleTransparencyCommand::new(app.clone()).use_debounce());
        assert!(ToggleWindowAnonymityCommand::new(app).use_debounce());
    }

    // ── clear-screenshot ──────────────────────────────────────────────────────

    #[test]
    fn test_clear_screenshot_deletes_files_but_keeps_subdirectories() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("beacon_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("keep")).unwrap();
        std::fs::write(dir.join("a.png"), b"a").unwrap();
        std::fs::write(dir.join("b.png"), b"b").unwrap();
        let mut command = ClearScreenshotCommand::new(&dir);

        // Act
        let deleted = command.clear_folder();
        command.execute().unwrap();

        // Assert
        assert_eq!(deleted, 2);
        assert!(!dir.join("a.png").exists());
        assert!(dir.join("keep").is_dir());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_clear_screenshot_missing_folder_is_noop() {
        let mut command =
            ClearScreenshotCommand::new("/nonexistent/path/that/cannot/exist/screenshot");

        assert_eq!(command.clear_folder(), 0);
        assert!(command.execute().is_ok());
        assert!(!command.use_debounce());
    }
}
