//! Commands every Beacon host registers before plugins load.
//!
//! | Name     | Effect                        | Debounced |
//! |----------|-------------------------------|-----------|
//! | `toggle` | show or hide the overlay      | yes       |
//! | `stop`   | quit the application          | no        |

use std::sync::Arc;

use beacon_core::{Application, Command, CommandError, CommandRegistry};
use tracing::info;

pub const TOGGLE_COMMAND: &str = "toggle";
pub const STOP_COMMAND: &str = "stop";

/// Shows the overlay if hidden, hides it if shown.
pub struct ToggleCommand {
    app: Arc<dyn Application>,
}

impl ToggleCommand {
    pub fn new(app: Arc<dyn Application>) -> Self {
        Self { app }
    }
}

impl Command for ToggleCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        let window = self.app.window().ok_or(CommandError::NoWindow)?;
        let visible = !window.is_visible();
        window.set_visible(visible);
        info!("overlay {}", if visible { "shown" } else { "hidden" });
        Ok(())
    }

    fn use_debounce(&self) -> bool {
        true
    }
}

/// Asks the application to quit.
pub struct StopCommand {
    app: Arc<dyn Application>,
}

impl StopCommand {
    pub fn new(app: Arc<dyn Application>) -> Self {
        Self { app }
    }
}

impl Command for StopCommand {
    fn execute(&mut self) -> Result<(), CommandError> {
        self.app.quit();
        Ok(())
    }

    fn use_debounce(&self) -> bool {
        false
    }
}

/// Registers `toggle` and `stop` against `app`.
pub fn register_builtin_commands(registry: &CommandRegistry, app: Arc<dyn Application>) {
    let toggle_app = Arc::clone(&app);
    registry.register_fn(TOGGLE_COMMAND, move || {
        Box::new(ToggleCommand::new(Arc::clone(&toggle_app))) as Box<dyn Command>
    });
    registry.register_fn(STOP_COMMAND, move || {
        Box::new(StopCommand::new(Arc::clone(&app))) as Box<dyn Command>
    });
}
