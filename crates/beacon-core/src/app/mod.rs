//! The application collaborators commands act upon.
//!
//! Commands never reach for globals; they receive an [`Application`] handle
//! (through the plugin context or their creator closure) and go through it to
//! the overlay window.  The host supplies the concrete implementations.

use std::path::PathBuf;
use std::sync::Arc;

/// Default folder for captured screenshots, relative to the working directory.
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshot";

/// Fully opaque window alpha.
pub const OPAQUE: u8 = 255;

/// The running application as seen by commands.
pub trait Application: Send + Sync {
    /// Requests that the message loop exit.  Must return promptly; the loop
    /// winds down after the current hook callback returns.
    fn quit(&self);

    /// The overlay window, if one has been created.
    fn window(&self) -> Option<Arc<dyn OverlayWindow>>;

    /// Folder holding captured screenshots.
    fn screenshot_dir(&self) -> PathBuf {
        PathBuf::from(DEFAULT_SCREENSHOT_DIR)
    }
}

/// The always-on-top overlay window.
pub trait OverlayWindow: Send + Sync {
    fn is_visible(&self) -> bool;

    fn set_visible(&self, visible: bool);

    /// Current alpha, 0 (invisible) to 255 (opaque).
    fn transparency(&self) -> u8;

    fn set_transparency(&self, alpha: u8);

    /// Whether the window is excluded from screen capture and the task bar.
    fn is_anonymous(&self) -> bool;

    fn set_anonymous(&self, anonymous: bool);

    fn toggle_anonymity(&self) {
        self.set_anonymous(!self.is_anonymous());
    }
}
