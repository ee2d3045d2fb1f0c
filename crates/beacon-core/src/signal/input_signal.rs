//! The canonical signal and its clock seam.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error};

use super::{Signal, DEBOUNCE_WINDOW};
use crate::command::Command;
use crate::input::{Input, KeyEvent};

/// Monotonic time source used for debouncing.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Binds one [`Input`] to one [`Command`] with optional debouncing.
///
/// With debouncing on, the command runs only if more than
/// [`DEBOUNCE_WINDOW`] has passed since it last ran.  A check that does not
/// execute leaves the window untouched.  The first trigger after construction
/// always runs.
pub struct InputSignal {
    name: String,
    input: Box<dyn Input>,
    command: Box<dyn Command>,
    use_debounce: bool,
    active: bool,
    last_trigger: Option<Instant>,
    clock: Arc<dyn Clock>,
}

impl InputSignal {
    pub fn new(input: Box<dyn Input>, command: Box<dyn Command>, use_debounce: bool) -> Self {
        Self {
            name: String::new(),
            input,
            command,
            use_debounce,
            active: false,
            last_trigger: None,
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Sets the command name used in log messages.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the debounce clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uses_debounce(&self) -> bool {
        self.use_debounce
    }

    fn debounced(&self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) => now.saturating_duration_since(last) <= DEBOUNCE_WINDOW,
            None => false,
        }
    }

    fn execute(&mut self) {
        let command = &mut self.command;
        match panic::catch_unwind(AssertUnwindSafe(|| command.execute())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("command '{}' failed: {e}; disabling its signal", self.name);
                self.stop();
            }
            Err(_) => {
                error!("command '{}' panicked; disabling its signal", self.name);
                self.stop();
            }
        }
    }
}

impl Signal for InputSignal {
    fn start(&mut self) {
        debug!("starting signal {}", self.name);
        self.active = true;
    }

    fn stop(&mut self) {
        debug!("stopping signal {}", self.name);
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn check(&mut self, event: &KeyEvent) {
        if !self.active || !self.input.is_active(event) {
            return;
        }

        let now = self.clock.now();
        if self.use_debounce && self.debounced(now) {
            return;
        }

        debug!("signal {} triggered", self.name);
        self.last_trigger = Some(now);
        self.execute();
    }
}

impl fmt::Debug for InputSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSignal")
            .field("name", &self.name)
            .field("use_debounce", &self.use_debounce)
            .field("active", &self.active)
            .field("last_trigger", &self.last_trigger)
            .finish_non_exhaustive()
    }
}
