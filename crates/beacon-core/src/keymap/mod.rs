//! Key name to platform key code translation.
//!
//! The [`KeyRegister`] is the catalogue of every key name a shortcut file may
//! use, mapped to the native code of the platform Beacon was compiled for:
//! Windows virtual-key codes, macOS Carbon `kVK_*` codes, or X11 KeySyms.
//! [`KeyMapper`] is the validated lookup front-end used by the input factory.
//!
//! # Case-insensitivity
//!
//! Names are normalised to upper case on insert *and* on lookup, so `"ctrl"`,
//! `"Ctrl"` and `"CTRL"` all resolve to the same code.
//!
//! # The pressed mask
//!
//! Besides real keys, every table registers the pseudo-key
//! [`KEY_PRESSED_MASK`].  Its value is the bit a raw key-state query sets when
//! a key is held down (`0x8000` for `GetAsyncKeyState`, `0x0100` on macOS).
//! Inputs AND the raw state with this mask to decide "pressed or not".

pub mod linux_x11;
pub mod macos_cg;
pub mod windows_vk;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use thiserror::Error;
use tracing::debug;

/// Reserved register entry holding the platform "is pressed" bitmask.
pub const KEY_PRESSED_MASK: &str = "KEY_PRESSED_MASK";

/// Error type for key register and key mapper lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The name is not present in the register.
    #[error("key not found: {0}")]
    NotFound(String),
    /// A shortcut names a key the register does not know.
    #[error("invalid key name: {0}")]
    InvalidKey(String),
    /// A shortcut names a modifier the register does not know.
    #[error("invalid modifier name: {0}")]
    InvalidModifier(String),
}

/// Process-wide catalogue of key names to platform codes.
///
/// The register is populated once at startup and is read-mostly afterwards.
/// It uses interior mutability so a single instance can be shared behind an
/// [`Arc`] between the input factory and whoever registers extra keys.
#[derive(Debug, Default)]
pub struct KeyRegister {
    keys: RwLock<HashMap<String, i32>>,
}

impl KeyRegister {
    /// Creates an empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a register populated from `table` plus the pressed mask.
    pub fn with_table(table: &[(&str, i32)], pressed_mask: i32) -> Self {
        let register = Self::new();
        for (name, code) in table {
            register.register_key(name, *code);
        }
        register.register_key(KEY_PRESSED_MASK, pressed_mask);
        register
    }

    /// Creates a register populated with the key table of the compile target.
    pub fn platform() -> Self {
        let (table, mask) = platform_table();
        Self::with_table(table, mask)
    }

    /// Inserts or overwrites `name`.  The last value registered wins.
    pub fn register_key(&self, name: &str, value: i32) {
        self.keys
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_uppercase(), value);
    }

    /// Returns the code registered for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotFound`] if the name has never been registered.
    pub fn get(&self, name: &str) -> Result<i32, KeyError> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_uppercase())
            .copied()
            .ok_or_else(|| KeyError::NotFound(name.to_string()))
    }

    /// Returns `true` if `name` is registered.
    pub fn has_key(&self, name: &str) -> bool {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&name.to_uppercase())
    }

    /// Returns the bitmask that marks a key as pressed in a raw state query.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotFound`] for registers built without a mask.
    pub fn pressed_mask(&self) -> Result<i32, KeyError> {
        self.get(KEY_PRESSED_MASK)
    }

    /// Number of registered names, including the pressed mask.
    pub fn len(&self) -> usize {
        self.keys.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the process-wide default register.
    ///
    /// The first call builds [`KeyRegister::platform`]; tests and embedders can
    /// swap the instance with [`KeyRegister::set_shared`].
    pub fn shared() -> Arc<KeyRegister> {
        Arc::clone(&shared_slot().read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the process-wide default register.
    pub fn set_shared(register: Arc<KeyRegister>) {
        *shared_slot().write().unwrap_or_else(PoisonError::into_inner) = register;
    }
}

fn shared_slot() -> &'static RwLock<Arc<KeyRegister>> {
    static SHARED: OnceLock<RwLock<Arc<KeyRegister>>> = OnceLock::new();
    SHARED.get_or_init(|| RwLock::new(Arc::new(KeyRegister::platform())))
}

#[cfg(target_os = "windows")]
fn platform_table() -> (&'static [(&'static str, i32)], i32) {
    (windows_vk::KEY_TABLE, windows_vk::PRESSED_MASK)
}

#[cfg(target_os = "macos")]
fn platform_table() -> (&'static [(&'static str, i32)], i32) {
    (macos_cg::KEY_TABLE, macos_cg::PRESSED_MASK)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn platform_table() -> (&'static [(&'static str, i32)], i32) {
    (linux_x11::KEY_TABLE, linux_x11::PRESSED_MASK)
}

/// Validated translation from shortcut vocabulary to key codes.
///
/// All functions are associated functions; the mapper holds no state and
/// resolves every name through the register it is handed.
pub struct KeyMapper;

impl KeyMapper {
    /// Returns `true` if `name` is a known key.
    pub fn is_valid_key(register: &KeyRegister, name: &str) -> bool {
        let valid = register.has_key(name);
        debug!("key name '{}' is {}", name.to_uppercase(), if valid { "valid" } else { "invalid" });
        valid
    }

    /// Returns `true` if `name` is a known modifier.
    pub fn is_valid_modifier(register: &KeyRegister, name: &str) -> bool {
        let valid = register.has_key(name);
        debug!(
            "modifier name '{}' is {}",
            name.to_uppercase(),
            if valid { "valid" } else { "invalid" }
        );
        valid
    }

    /// Resolves a key name to its platform code.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKey`] if the name is not registered.
    pub fn key_code(register: &KeyRegister, name: &str) -> Result<i32, KeyError> {
        debug!("looking up key code for: {name}");
        if !register.has_key(name) {
            return Err(KeyError::InvalidKey(name.to_string()));
        }
        let code = register.get(name)?;
        debug!("found key code: {code:#x}");
        Ok(code)
    }

    /// Resolves a modifier name to its platform code.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidModifier`] if the name is not registered.
    pub fn modifier_code(register: &KeyRegister, name: &str) -> Result<i32, KeyError> {
        debug!("looking up modifier code for: {name}");
        if !register.has_key(name) {
            return Err(KeyError::InvalidModifier(name.to_string()));
        }
        let code = register.get(name)?;
        debug!("found modifier code: {code:#x}");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows_register() -> KeyRegister {
        KeyRegister::with_table(windows_vk::KEY_TABLE, windows_vk::PRESSED_MASK)
    }

    // ── KeyRegister ───────────────────────────────────────────────────────────

    #[test]
    fn test_register_key_lookup_is_case_insensitive() {
        // Arrange
        let register = KeyRegister::new();

        // Act
        register.register_key("Ctrl", 0x11);

        // Assert
        assert!(register.has_key("ctrl"));
        assert!(register.has_key("CTRL"));
        assert_eq!(register.get("cTrL"), Ok(0x11));
    }

    #[test]
    fn test_register_key_twice_keeps_last_value_without_duplicates() {
        // Arrange
        let register = KeyRegister::new();

        // Act
        register.register_key("alt", 1);
        register.register_key("ALT", 2);

        // Assert
        assert_eq!(register.get("Alt"), Ok(2));
        assert_eq!(register.len(), 1);
    }

    #[test]
    fn test_get_unknown_key_returns_not_found() {
        let register = KeyRegister::new();
        assert_eq!(
            register.get("Hyper"),
            Err(KeyError::NotFound("Hyper".to_string()))
        );
    }

    #[test]
    fn test_has_key_matches_has_key_of_uppercased_name_for_every_entry() {
        let register = windows_register();
        for (name, _) in windows_vk::KEY_TABLE {
            assert_eq!(register.has_key(name), register.has_key(&name.to_uppercase()));
            assert_eq!(register.has_key(name), register.has_key(&name.to_lowercase()));
        }
    }

    #[test]
    fn test_with_table_registers_pressed_mask() {
        let register = windows_register();
        assert_eq!(register.pressed_mask(), Ok(0x8000));
    }

    #[test]
    fn test_empty_register_has_no_pressed_mask() {
        let register = KeyRegister::new();
        assert!(register.is_empty());
        assert!(register.pressed_mask().is_err());
    }

    #[test]
    fn test_platform_register_knows_default_shortcut_keys() {
        let register = KeyRegister::platform();
        assert!(register.has_key("Ctrl"));
        assert!(register.has_key("F1"));
        assert!(register.has_key("/"));
        assert!(register.pressed_mask().is_ok());
    }

    #[test]
    fn test_set_shared_replaces_default_instance() {
        // Arrange
        let custom = Arc::new(KeyRegister::new());
        custom.register_key("beacon-test-key", 42);

        // Act
        KeyRegister::set_shared(Arc::clone(&custom));

        // Assert
        assert_eq!(KeyRegister::shared().get("BEACON-TEST-KEY"), Ok(42));
        KeyRegister::set_shared(Arc::new(KeyRegister::platform()));
    }

    // ── KeyMapper ─────────────────────────────────────────────────────────────

    #[test]
    fn test_mapper_resolves_letters_digits_and_function_keys() {
        let register = windows_register();
        assert_eq!(KeyMapper::key_code(&register, "a"), Ok(0x41));
        assert_eq!(KeyMapper::key_code(&register, "7"), Ok(0x37));
        assert_eq!(KeyMapper::key_code(&register, "f1"), Ok(0x70));
        assert_eq!(KeyMapper::key_code(&register, "Num 1"), Ok(0x61));
    }

    #[test]
    fn test_mapper_resolves_modifiers() {
        let register = windows_register();
        assert_eq!(KeyMapper::modifier_code(&register, "ctrl"), Ok(0x11));
        assert_eq!(KeyMapper::modifier_code(&register, "Alt"), Ok(0x12));
        assert_eq!(KeyMapper::modifier_code(&register, "SHIFT"), Ok(0x10));
        assert_eq!(KeyMapper::modifier_code(&register, "Win"), Ok(0x5B));
    }

    #[test]
    fn test_mapper_rejects_unknown_key() {
        let register = windows_register();
        assert!(!KeyMapper::is_valid_key(&register, "F99"));
        assert_eq!(
            KeyMapper::key_code(&register, "F99"),
            Err(KeyError::InvalidKey("F99".to_string()))
        );
    }

    #[test]
    fn test_mapper_rejects_unknown_modifier() {
        let register = windows_register();
        assert!(!KeyMapper::is_valid_modifier(&register, "Hyper"));
        assert_eq!(
            KeyMapper::modifier_code(&register, "Hyper"),
            Err(KeyError::InvalidModifier("Hyper".to_string()))
        );
    }
}
