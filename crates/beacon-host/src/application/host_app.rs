//! The host's [`Application`] implementation and its overlay window.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use beacon_core::app::{DEFAULT_SCREENSHOT_DIR, OPAQUE};
use beacon_core::{Application, OverlayWindow};
use tracing::{debug, info};

// ── Quit handle ───────────────────────────────────────────────────────────────

/// Callback that wakes a blocked platform message loop.
pub type QuitWaker = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct QuitState {
    requested: bool,
    waker: Option<QuitWaker>,
}

/// One-shot quit request shared between commands, the Ctrl-C listener, and
/// the message loop.
///
/// Loops that block in an OS call register a [`QuitWaker`]; loops that block
/// in [`QuitHandle::wait`] need nothing extra.
#[derive(Default)]
pub struct QuitHandle {
    state: Mutex<QuitState>,
    wake: Condvar,
}

impl QuitHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks quit as requested and wakes the loop.  Idempotent.
    pub fn request(&self) {
        let waker = {
            let mut state = self.lock();
            if state.requested {
                return;
            }
            state.requested = true;
            state.waker.clone()
        };
        info!("quit requested");
        self.wake.notify_all();
        if let Some(waker) = waker {
            waker();
        }
    }

    pub fn is_requested(&self) -> bool {
        self.lock().requested
    }

    /// Installs the loop's waker.
    ///
    /// Returns `true` if quit was already requested, in which case the
    /// caller should not enter its loop at all.
    pub fn set_waker(&self, waker: QuitWaker) -> bool {
        let mut state = self.lock();
        state.waker = Some(waker);
        state.requested
    }

    pub fn clear_waker(&self) {
        self.lock().waker = None;
    }

    /// Blocks the calling thread until [`QuitHandle::request`] is called.
    pub fn wait(&self) {
        let mut state = self.lock();
        while !state.requested {
            state = self.wake.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn lock(&self) -> MutexGuard<'_, QuitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Overlay window ────────────────────────────────────────────────────────────

/// State-only overlay window.
///
/// Rendering belongs to the UI layer; this type holds what the commands
/// change so the UI (or a test) can observe it.  Starts visible, opaque and
/// not anonymous.
#[derive(Debug)]
pub struct HeadlessOverlay {
    visible: AtomicBool,
    alpha: AtomicU8,
    anonymous: AtomicBool,
}

impl HeadlessOverlay {
    pub fn new() -> Self {
        Self {
            visible: AtomicBool::new(true),
            alpha: AtomicU8::new(OPAQUE),
            anonymous: AtomicBool::new(false),
        }
    }
}

impl Default for HeadlessOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayWindow for HeadlessOverlay {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
        debug!("overlay visible: {visible}");
    }

    fn transparency(&self) -> u8 {
        self.alpha.load(Ordering::SeqCst)
    }

    fn set_transparency(&self, alpha: u8) {
        self.alpha.store(alpha, Ordering::SeqCst);
        debug!("overlay alpha: {alpha}");
    }

    fn is_anonymous(&self) -> bool {
        self.anonymous.load(Ordering::SeqCst)
    }

    fn set_anonymous(&self, anonymous: bool) {
        self.anonymous.store(anonymous, Ordering::SeqCst);
        debug!("overlay anonymous: {anonymous}");
    }
}

// ── Application ───────────────────────────────────────────────────────────────

/// The running Beacon host as seen by commands and plugins.
pub struct HostApplication {
    window: Option<Arc<HeadlessOverlay>>,
    quit: Arc<QuitHandle>,
    screenshot_dir: PathBuf,
}

impl HostApplication {
    /// An application with a fresh overlay window.
    pub fn new(quit: Arc<QuitHandle>) -> Self {
        Self {
            window: Some(Arc::new(HeadlessOverlay::new())),
            quit,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }

    /// An application whose window has not been created (or was closed).
    pub fn without_window(quit: Arc<QuitHandle>) -> Self {
        Self {
            window: None,
            ..Self::new(quit)
        }
    }

    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// The concrete overlay, for observers that need more than the trait.
    pub fn overlay(&self) -> Option<Arc<HeadlessOverlay>> {
        self.window.clone()
    }

    pub fn quit_handle(&self) -> Arc<QuitHandle> {
        Arc::clone(&self.quit)
    }
}

impl Application for HostApplication {
    fn quit(&self) {
        self.quit.request();
    }

    fn window(&self) -> Option<Arc<dyn OverlayWindow>> {
        self.window
            .as_ref()
            .map(|w| Arc::clone(w) as Arc<dyn OverlayWindow>)
    }

    fn screenshot_dir(&self) -> PathBuf {
        self.screenshot_dir.clone()
    }
}
