//! Application layer of the Beacon host.
//!
//! # What lives here? (for beginners)
//!
//! The core crate only knows the [`beacon_core::Application`] and
//! [`beacon_core::OverlayWindow`] traits.  This layer provides the concrete
//! objects behind them and the two commands every host ships with.
//!
//! Like the rest of the application layer, nothing here calls the OS
//! directly.  Waking the platform message loop is delegated to a callback the
//! infrastructure installs on the [`host_app::QuitHandle`].
//!
//! # Sub-modules
//!
//! - **`host_app`** – `HostApplication`, the state-only `HeadlessOverlay`, and
//!   the `QuitHandle` the message loop waits on.
//! - **`builtin_commands`** – `toggle` (show/hide the overlay) and `stop`
//!   (quit the application).

pub mod builtin_commands;
pub mod host_app;
