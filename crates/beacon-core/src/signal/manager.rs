//! The signal manager: owns the signal set and the keyboard hook.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};

use tracing::{debug, info, warn};

use super::{HookCallback, KeyboardHook, Signal, SignalError, SignalFactory};
use crate::input::{KeyEvent, PressedKeys};

/// State shared between the manager and the hook callback.
#[derive(Default)]
struct Dispatch {
    signals: Mutex<Vec<Box<dyn Signal>>>,
    tracker: OnceLock<Arc<PressedKeys>>,
}

impl Dispatch {
    fn signals(&self) -> MutexGuard<'_, Vec<Box<dyn Signal>>> {
        self.signals.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_hook_event(&self, event: &KeyEvent) {
        if let Some(tracker) = self.tracker.get() {
            tracker.observe(event);
        }

        match self.signals.try_lock() {
            Ok(mut signals) => check_all(&mut signals, event),
            Err(TryLockError::Poisoned(poisoned)) => check_all(&mut poisoned.into_inner(), event),
            // A command synthesised input from inside a check.
            Err(TryLockError::WouldBlock) => {
                debug!("signal set busy; dropping re-entrant key event {:?}", event)
            }
        }
    }
}

fn check_all(signals: &mut [Box<dyn Signal>], event: &KeyEvent) {
    for signal in signals.iter_mut() {
        signal.check(event);
    }
}

/// Owns every signal and the OS keyboard hook feeding them.
///
/// The hook is installed when the manager is created.  If installation fails
/// the manager still works (signals can be driven through
/// [`KeyboardSignalManager::check_signals`]) but no global shortcuts fire.
///
/// Dropping the manager removes the hook before the signals are released, so
/// no callback can reach a half-destroyed signal set.
pub struct KeyboardSignalManager {
    factory: Arc<dyn SignalFactory>,
    hook: Box<dyn KeyboardHook>,
    dispatch: Arc<Dispatch>,
}

impl KeyboardSignalManager {
    pub fn new(factory: Arc<dyn SignalFactory>, mut hook: Box<dyn KeyboardHook>) -> Self {
        let dispatch = Arc::new(Dispatch::default());

        let target = Arc::clone(&dispatch);
        let callback: HookCallback = Arc::new(move |event: &KeyEvent| target.on_hook_event(event));
        match hook.install(callback) {
            Ok(()) => info!("keyboard hook installed"),
            Err(e) => warn!("keyboard hook unavailable, global shortcuts disabled: {e}"),
        }

        Self {
            factory,
            hook,
            dispatch,
        }
    }

    /// Feeds every hook event into `tracker` before the signals are checked.
    ///
    /// Used on platforms where inputs read key state from a [`PressedKeys`]
    /// rather than an OS query.  Only the first tracker is kept.
    pub fn with_key_tracker(self, tracker: Arc<PressedKeys>) -> Self {
        if self.dispatch.tracker.set(tracker).is_err() {
            warn!("key tracker already attached; ignoring replacement");
        }
        self
    }

    pub fn is_hook_installed(&self) -> bool {
        self.hook.is_installed()
    }

    /// Appends a signal.  It is not started automatically.
    pub fn add_signal(&self, signal: Box<dyn Signal>) {
        self.dispatch.signals().push(signal);
    }

    /// Starts every signal, first building the set from the factory if it is
    /// empty.
    ///
    /// # Errors
    ///
    /// Propagates the factory's [`SignalError`]; nothing is started then.
    pub fn start_signals(&self) -> Result<(), SignalError> {
        let mut signals = self.dispatch.signals();
        if signals.is_empty() {
            debug!("no signals present, creating signals from factory");
            signals.extend(self.factory.create_signals()?);
        }
        for signal in signals.iter_mut() {
            signal.start();
        }
        info!("started {} signal(s)", signals.len());
        Ok(())
    }

    /// Stops every signal.  The set itself is kept.
    pub fn stop_signals(&self) {
        let mut signals = self.dispatch.signals();
        for signal in signals.iter_mut() {
            signal.stop();
        }
        debug!("stopped {} signal(s)", signals.len());
    }

    /// Checks every signal against `event`, in insertion order.
    ///
    /// Every signal is visited even if an earlier one fired.
    pub fn check_signals(&self, event: &KeyEvent) {
        check_all(&mut self.dispatch.signals(), event);
    }

    pub fn signal_count(&self) -> usize {
        self.dispatch.signals().len()
    }

    /// Replaces the signal set with a fresh one from the factory and starts
    /// it.  Used after the shortcut file or the plugin set changed.
    ///
    /// On error the current set is left untouched.
    pub fn rebuild_signals(&self) -> Result<usize, SignalError> {
        let mut fresh = self.factory.create_signals()?;
        for signal in fresh.iter_mut() {
            signal.start();
        }

        let mut signals = self.dispatch.signals();
        for signal in signals.iter_mut() {
            signal.stop();
        }
        *signals = fresh;
        info!("rebuilt {} signal(s)", signals.len());
        Ok(signals.len())
    }
}

impl Drop for KeyboardSignalManager {
    fn drop(&mut self) {
        if self.hook.is_installed() {
            self.hook.uninstall();
            debug!("keyboard hook uninstalled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::mock::MockKeyboardHook;
    use crate::signal::HookError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ── Test doubles ──────────────────────────────────────────────────────────

    /// Counts checks, and executions when `fires` is set.
    struct StubSignal {
        active: bool,
        fires: bool,
        checks: Arc<AtomicUsize>,
        runs: Arc<AtomicUsize>,
    }

    impl Signal for StubSignal {
        fn start(&mut self) {
            self.active = true;
        }

        fn stop(&mut self) {
            self.active = false;
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn check(&mut self, _event: &KeyEvent) {
            self.checks.fetch_add(1, Ordering::SeqCst);
            if self.active && self.fires {
                self.runs.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[derive(Clone, Default)]
    struct Counters {
        checks: Arc<AtomicUsize>,
        runs: Arc<AtomicUsize>,
    }

    impl Counters {
        fn stub(&self, fires: bool) -> Box<dyn Signal> {
            Box::new(StubSignal {
                active: false,
                fires,
                checks: self.checks.clone(),
                runs: self.runs.clone(),
            })
        }

        fn checks(&self) -> usize {
            self.checks.load(Ordering::SeqCst)
        }

        fn runs(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    /// Builds `count` firing stubs per call; fails when `count` is `None`.
    struct StubFactory {
        count: Mutex<Option<usize>>,
        builds: AtomicUsize,
        counters: Counters,
    }

    impl StubFactory {
        fn new(count: Option<usize>, counters: Counters) -> Arc<Self> {
            Arc::new(Self {
                count: Mutex::new(count),
                builds: AtomicUsize::new(0),
                counters,
            })
        }
    }

    impl SignalFactory for StubFactory {
        fn create_signals(&self) -> Result<Vec<Box<dyn Signal>>, SignalError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            match *self.count.lock().unwrap() {
                Some(n) => Ok((0..n).map(|_| self.counters.stub(true)).collect()),
                None => Err(SignalError::UnknownCommand("missing".to_string())),
            }
        }
    }

    fn manager(factory: Arc<StubFactory>) -> (KeyboardSignalManager, MockKeyboardHook) {
        let hook = MockKeyboardHook::new();
        let manager = KeyboardSignalManager::new(factory, Box::new(hook.clone()));
        (manager, hook)
    }

    // ── Construction and teardown ─────────────────────────────────────────────

    #[test]
    fn test_new_installs_hook() {
        let (manager, hook) = manager(StubFactory::new(Some(0), Counters::default()));

        assert!(manager.is_hook_installed());
        assert_eq!(hook.install_count(), 1);
    }

    #[test]
    fn test_hook_install_failure_is_degraded_not_fatal() {
        // Arrange
        let counters = Counters::default();
        let hook = MockKeyboardHook::failing(HookError::InstallFailed("denied".into()));

        // Act
        let manager = KeyboardSignalManager::new(
            StubFactory::new(Some(1), counters.clone()),
            Box::new(hook.clone()),
        );
        manager.start_signals().unwrap();
        manager.check_signals(&KeyEvent::down(1));

        // Assert
        assert!(!manager.is_hook_installed());
        assert!(!hook.fire(KeyEvent::down(1)));
        assert_eq!(counters.runs(), 1);
    }

    #[test]
    fn test_drop_uninstalls_hook_before_signals() {
        // Arrange
        let counters = Counters::default();
        let (manager, hook) = manager(StubFactory::new(Some(1), counters.clone()));
        manager.start_signals().unwrap();

        // Act
        drop(manager);

        // Assert
        assert!(!hook.is_installed());
        assert_eq!(hook.uninstall_count(), 1);
        assert!(!hook.fire(KeyEvent::down(1)));
        assert_eq!(counters.checks(), 0);
    }

    // ── start / stop ──────────────────────────────────────────────────────────

    #[test]
    fn test_start_signals_builds_lazily_once() {
        // Arrange
        let counters = Counters::default();
        let factory = StubFactory::new(Some(2), counters);
        let (manager, _hook) = manager(factory.clone());

        // Act
        manager.start_signals().unwrap();
        manager.stop_signals();
        manager.start_signals().unwrap();

        // Assert
        assert_eq!(manager.signal_count(), 2);
        assert_eq!(factory.builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_start_signals_skips_factory_when_signals_added() {
        let counters = Counters::default();
        let factory = StubFactory::new(Some(5), counters.clone());
        let (manager, _hook) = manager(factory.clone());
        manager.add_signal(counters.stub(true));

        manager.start_signals().unwrap();

        assert_eq!(manager.signal_count(), 1);
        assert_eq!(factory.builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_start_signals_propagates_factory_error() {
        let (manager, _hook) = manager(StubFactory::new(None, Counters::default()));

        assert!(matches!(
            manager.start_signals(),
            Err(SignalError::UnknownCommand(_))
        ));
        assert_eq!(manager.signal_count(), 0);
    }

    #[test]
    fn test_stop_signals_keeps_collection() {
        let counters = Counters::default();
        let (manager, hook) = manager(StubFactory::new(Some(2), counters.clone()));
        manager.start_signals().unwrap();

        manager.stop_signals();
        hook.fire(KeyEvent::down(1));

        assert_eq!(manager.signal_count(), 2);
        assert_eq!(counters.checks(), 2);
        assert_eq!(counters.runs(), 0);
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    #[test]
    fn test_every_signal_visited_once_per_event() {
        // Arrange
        let counters = Counters::default();
        let (manager, hook) = manager(StubFactory::new(Some(3), counters.clone()));
        manager.start_signals().unwrap();

        // Act
        hook.fire(KeyEvent::down(0x70));
        manager.check_signals(&KeyEvent::up(0x70));

        // Assert
        assert_eq!(counters.checks(), 6);
        assert_eq!(counters.runs(), 6);
    }

    #[test]
    fn test_hook_events_update_key_tracker() {
        // Arrange
        let tracker = Arc::new(PressedKeys::new(0x8000));
        let (manager, hook) = manager(StubFactory::new(Some(0), Counters::default()));
        let _manager = manager.with_key_tracker(tracker.clone());

        // Act
        hook.fire(KeyEvent::down(0x11));

        // Assert
        assert!(tracker.is_held(0x11));
        hook.fire(KeyEvent::up(0x11));
        assert!(!tracker.is_held(0x11));
    }

    // ── Rebuild ───────────────────────────────────────────────────────────────

    #[test]
    fn test_rebuild_replaces_and_starts_signals() {
        // Arrange
        let counters = Counters::default();
        let factory = StubFactory::new(Some(1), counters.clone());
        let (manager, hook) = manager(factory.clone());
        manager.start_signals().unwrap();
        *factory.count.lock().unwrap() = Some(3);

        // Act
        let count = manager.rebuild_signals().unwrap();
        hook.fire(KeyEvent::down(1));

        // Assert
        assert_eq!(count, 3);
        assert_eq!(manager.signal_count(), 3);
        assert_eq!(counters.runs(), 3);
    }

    #[test]
    fn test_rebuild_failure_keeps_current_set() {
        let counters = Counters::default();
        let factory = StubFactory::new(Some(2), counters.clone());
        let (manager, hook) = manager(factory.clone());
        manager.start_signals().unwrap();
        *factory.count.lock().unwrap() = None;

        assert!(manager.rebuild_signals().is_err());
        hook.fire(KeyEvent::down(1));

        assert_eq!(manager.signal_count(), 2);
        assert_eq!(counters.runs(), 2);
    }
}
