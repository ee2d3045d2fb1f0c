//! Building the signal set from configuration and the command registry.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info};

use super::input_signal::{Clock, InputSignal, MonotonicClock};
use super::{Signal, SignalError};
use crate::command::CommandRegistry;
use crate::input::InputFactory;

/// Produces a complete, not-yet-started signal set.
pub trait SignalFactory: Send + Sync {
    /// Builds one signal per configured command.
    ///
    /// All or nothing: on error no partial set is returned.
    fn create_signals(&self) -> Result<Vec<Box<dyn Signal>>, SignalError>;
}

/// Cross-references an [`InputFactory`] with a [`CommandRegistry`].
///
/// Every command named in the shortcut file must be registered; a missing one
/// fails the whole build with [`SignalError::UnknownCommand`].  Debouncing is
/// taken from [`crate::command::Command::use_debounce`].
pub struct KeyboardSignalFactory {
    inputs: Mutex<Box<dyn InputFactory>>,
    commands: Arc<CommandRegistry>,
    clock: Arc<dyn Clock>,
}

impl KeyboardSignalFactory {
    pub fn new(inputs: Box<dyn InputFactory>, commands: Arc<CommandRegistry>) -> Self {
        Self {
            inputs: Mutex::new(inputs),
            commands,
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Replaces the debounce clock handed to every created signal.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl SignalFactory for KeyboardSignalFactory {
    fn create_signals(&self) -> Result<Vec<Box<dyn Signal>>, SignalError> {
        let mut inputs = self.inputs.lock().unwrap_or_else(PoisonError::into_inner);
        inputs.initialize()?;

        let mut signals: Vec<Box<dyn Signal>> = Vec::new();
        for name in inputs.configured_commands()? {
            let Some(command) = self.commands.command(&name) else {
                error!("unknown command in configuration: {name}");
                return Err(SignalError::UnknownCommand(name));
            };
            let input = inputs.create_input(&name)?;
            let use_debounce = command.use_debounce();
            let signal = InputSignal::new(input, command, use_debounce)
                .with_name(name)
                .with_clock(Arc::clone(&self.clock));
            debug!(
                "created signal for {} (debounce: {})",
                signal.name(),
                signal.uses_debounce()
            );
            signals.push(Box::new(signal));
        }

        info!("built {} signal(s)", signals.len());
        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, CommandError};
    use crate::input::{Input, InputFactoryError, KeyEvent};
    use mockall::mock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        Inputs {}
        impl InputFactory for Inputs {
            fn initialize(&mut self) -> Result<(), InputFactoryError>;
            fn create_input(&self, command: &str) -> Result<Box<dyn Input>, InputFactoryError>;
            fn has_shortcut(&self, command: &str) -> Result<bool, InputFactoryError>;
            fn configured_commands(&self) -> Result<Vec<String>, InputFactoryError>;
        }
    }

    struct Always;

    impl Input for Always {
        fn is_active(&self, _event: &KeyEvent) -> bool {
            true
        }
    }

    struct Counting {
        runs: Arc<AtomicUsize>,
        debounce: bool,
    }

    impl Command for Counting {
        fn execute(&mut self) -> Result<(), CommandError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn use_debounce(&self) -> bool {
            self.debounce
        }
    }

    fn register(registry: &CommandRegistry, name: &str, debounce: bool) -> Arc<AtomicUsize> {
        let runs = Arc::new(AtomicUsize::new(0));
        let shared = runs.clone();
        registry.register_fn(name, move || {
            Box::new(Counting {
                runs: shared.clone(),
                debounce,
            }) as Box<dyn Command>
        });
        runs
    }

    fn inputs_for(commands: &[&str]) -> MockInputs {
        let names: Vec<String> = commands.iter().map(|s| s.to_string()).collect();
        let mut inputs = MockInputs::new();
        inputs.expect_initialize().returning(|| Ok(()));
        inputs
            .expect_configured_commands()
            .returning(move || Ok(names.clone()));
        inputs
            .expect_create_input()
            .returning(|_| Ok(Box::new(Always) as Box<dyn Input>));
        inputs
    }

    #[test]
    fn test_builds_one_signal_per_configured_and_registered_command() {
        // Arrange
        let registry = Arc::new(CommandRegistry::new());
        let toggle = register(&registry, "toggle", true);
        let stop = register(&registry, "stop", false);
        let factory = KeyboardSignalFactory::new(Box::new(inputs_for(&["toggle", "stop"])), registry);

        // Act
        let mut signals = factory.create_signals().unwrap();

        // Assert
        assert_eq!(signals.len(), 2);
        assert!(signals.iter().all(|s| !s.is_active()));
        signals[0].start();
        signals[0].check(&KeyEvent::down(0));
        assert_eq!(toggle.load(Ordering::SeqCst), 1);
        assert_eq!(stop.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_command_fails_whole_build() {
        let registry = Arc::new(CommandRegistry::new());
        register(&registry, "toggle", true);
        let factory =
            KeyboardSignalFactory::new(Box::new(inputs_for(&["toggle", "missing"])), registry);

        let err = factory.create_signals().err().unwrap();

        assert!(matches!(err, SignalError::UnknownCommand(ref c) if c == "missing"));
    }

    #[test]
    fn test_empty_configuration_yields_empty_set() {
        let factory = KeyboardSignalFactory::new(
            Box::new(inputs_for(&[])),
            Arc::new(CommandRegistry::new()),
        );

        assert!(factory.create_signals().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_failure_propagates() {
        let mut inputs = MockInputs::new();
        inputs
            .expect_initialize()
            .returning(|| Err(InputFactoryError::NotInitialized));
        let factory = KeyboardSignalFactory::new(Box::new(inputs), Arc::new(CommandRegistry::new()));

        assert!(matches!(
            factory.create_signals(),
            Err(SignalError::Input(InputFactoryError::NotInitialized))
        ));
    }

    #[test]
    fn test_invalid_input_fails_whole_build() {
        // Arrange
        let registry = Arc::new(CommandRegistry::new());
        register(&registry, "toggle", true);
        let mut inputs = MockInputs::new();
        inputs.expect_initialize().returning(|| Ok(()));
        inputs
            .expect_configured_commands()
            .returning(|| Ok(vec!["toggle".to_string()]));
        inputs
            .expect_create_input()
            .returning(|c| Err(InputFactoryError::NoCommandFound(c.to_string())));
        let factory = KeyboardSignalFactory::new(Box::new(inputs), registry);

        // Act / Assert
        assert!(matches!(
            factory.create_signals(),
            Err(SignalError::Input(InputFactoryError::NoCommandFound(_)))
        ));
    }

    #[test]
    fn test_create_signals_reinitializes_on_every_call() {
        let mut inputs = MockInputs::new();
        inputs.expect_initialize().times(2).returning(|| Ok(()));
        inputs.expect_configured_commands().returning(|| Ok(Vec::new()));
        let factory = KeyboardSignalFactory::new(Box::new(inputs), Arc::new(CommandRegistry::new()));

        factory.create_signals().unwrap();
        factory.create_signals().unwrap();
    }

    #[test]
    fn test_debounce_flag_comes_from_command() {
        let registry = Arc::new(CommandRegistry::new());
        let runs = register(&registry, "stop", false);
        let factory = KeyboardSignalFactory::new(Box::new(inputs_for(&["stop"])), registry);
        let mut signals = factory.create_signals().unwrap();

        signals[0].start();
        signals[0].check(&KeyEvent::down(0));
        signals[0].check(&KeyEvent::down(0));

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
