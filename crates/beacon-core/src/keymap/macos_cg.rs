//! macOS Carbon virtual key codes (`kVK_*` from `HIToolbox/Events.h`).
//!
//! Carbon codes are positional (ANSI layout), which is why the letters are not
//! in alphabetical order.  Keys with no macOS counterpart (`PrtSc`, `Ins`,
//! `ScrLk`, `Pause`) alias `kVK_ANSI_KeypadClear` so shortcut files written on
//! Windows still parse.

/// Bit reported for a held key by the macOS key-state query.
pub const PRESSED_MASK: i32 = 0x0100;

const KEYPAD_CLEAR: i32 = 0x47;

/// Key name to Carbon key code.
pub const KEY_TABLE: &[(&str, i32)] = &[
    // Letters
    ("A", 0x00),
    ("B", 0x0B),
    ("C", 0x08),
    ("D", 0x02),
    ("E", 0x0E),
    ("F", 0x03),
    ("G", 0x05),
    ("H", 0x04),
    ("I", 0x22),
    ("J", 0x26),
    ("K", 0x28),
    ("L", 0x25),
    ("M", 0x2E),
    ("N", 0x2D),
    ("O", 0x1F),
    ("P", 0x23),
    ("Q", 0x0C),
    ("R", 0x0F),
    ("S", 0x01),
    ("T", 0x11),
    ("U", 0x20),
    ("V", 0x09),
    ("W", 0x0D),
    ("X", 0x07),
    ("Y", 0x10),
    ("Z", 0x06),
    // Digits
    ("0", 0x1D),
    ("1", 0x12),
    ("2", 0x13),
    ("3", 0x14),
    ("4", 0x15),
    ("5", 0x17),
    ("6", 0x16),
    ("7", 0x1A),
    ("8", 0x1C),
    ("9", 0x19),
    // Function keys
    ("F1", 0x7A),
    ("F2", 0x78),
    ("F3", 0x63),
    ("F4", 0x76),
    ("F5", 0x60),
    ("F6", 0x61),
    ("F7", 0x62),
    ("F8", 0x64),
    ("F9", 0x65),
    ("F10", 0x6D),
    ("F11", 0x67),
    ("F12", 0x6F),
    ("F13", 0x69),
    ("F14", 0x6B),
    ("F15", 0x71),
    ("F16", 0x6A),
    ("F17", 0x40),
    ("F18", 0x4F),
    ("F19", 0x50),
    ("F20", 0x5A),
    // Editing and navigation
    ("Esc", 0x35),
    ("Tab", 0x30),
    ("CapsLock", 0x39),
    ("Space", 0x31),
    ("Backspace", 0x33),
    ("Enter", 0x24),
    ("Del", 0x75),
    ("Home", 0x73),
    ("End", 0x77),
    ("PgUp", 0x74),
    ("PgDn", 0x79),
    ("Help", 0x72),
    ("Clear", KEYPAD_CLEAR),
    ("PrtSc", KEYPAD_CLEAR),
    ("Ins", KEYPAD_CLEAR),
    ("ScrLk", KEYPAD_CLEAR),
    ("Pause", KEYPAD_CLEAR),
    // Arrows
    ("↑", 0x7E),
    ("↓", 0x7D),
    ("←", 0x7B),
    ("→", 0x7C),
    ("Up", 0x7E),
    ("Down", 0x7D),
    ("Left", 0x7B),
    ("Right", 0x7C),
    // Modifiers
    ("Ctrl", 0x3B),
    ("Alt", 0x3A),
    ("Shift", 0x38),
    ("Left Ctrl", 0x3B),
    ("Right Ctrl", 0x3E),
    ("Left Shift", 0x38),
    ("Right Shift", 0x3C),
    ("Left Alt", 0x3A),
    ("Right Alt", 0x3D),
    ("Left Cmd", 0x37),
    ("Right Cmd", 0x36),
    ("Cmd", 0x37),
    // Punctuation
    ("/", 0x2C),
    (";", 0x29),
    ("=", 0x18),
    ("-", 0x1B),
    ("[", 0x21),
    ("]", 0x1E),
    ("'", 0x27),
    (",", 0x2B),
    (".", 0x2F),
    ("\\", 0x2A),
    ("`", 0x32),
    // Keypad
    ("Num 0", 0x52),
    ("Num 1", 0x53),
    ("Num 2", 0x54),
    ("Num 3", 0x55),
    ("Num 4", 0x56),
    ("Num 5", 0x57),
    ("Num 6", 0x58),
    ("Num 7", 0x59),
    ("Num 8", 0x5B),
    ("Num 9", 0x5C),
    ("Num .", 0x41),
    ("Num *", 0x43),
    ("Num +", 0x45),
    ("Num -", 0x4E),
    ("Num /", 0x4B),
    ("Num Enter", 0x4C),
    // Apple keyboards have no NumLock; the key in that position is keypad '='.
    ("NumLock", 0x51),
    // Media
    ("Vol +", 0x48),
    ("Vol -", 0x49),
    ("Mute", 0x4A),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_no_duplicate_names() {
        let mut seen = HashSet::new();
        for (name, _) in KEY_TABLE {
            assert!(seen.insert(name.to_uppercase()), "duplicate name {name}");
        }
    }

    #[test]
    fn test_non_windows_default_shortcut_keys_present() {
        let names: HashSet<&str> = KEY_TABLE.iter().map(|(k, _)| *k).collect();
        assert!(names.contains("Ctrl"));
        assert!(names.contains("F1"));
        assert!(names.contains("Cmd"));
        assert!(names.contains("/"));
    }
}
