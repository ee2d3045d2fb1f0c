//! Infrastructure layer for the Beacon host.
//!
//! Contains OS-facing adapters: the global keyboard hook, the message loop,
//! plugin library loading, and file-system storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `beacon_core`, but MUST NOT be imported by the `application` layer.

pub mod keyboard_hook;
pub mod message_loop;
pub mod plugins;
pub mod storage;
