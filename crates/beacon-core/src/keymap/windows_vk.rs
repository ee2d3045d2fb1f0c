//! Windows virtual-key codes.
//!
//! Values are the `VK_*` constants from `WinUser.h`, spelled out as integers so
//! the table compiles on every target (tests exercise it on Linux CI too).

/// Bit set by `GetAsyncKeyState` while a key is held.
pub const PRESSED_MASK: i32 = 0x8000;

/// Key name to virtual-key code.
pub const KEY_TABLE: &[(&str, i32)] = &[
    // Letters (VK code equals the ASCII upper-case letter)
    ("A", 0x41),
    ("B", 0x42),
    ("C", 0x43),
    ("D", 0x44),
    ("E", 0x45),
    ("F", 0x46),
    ("G", 0x47),
    ("H", 0x48),
    ("I", 0x49),
    ("J", 0x4A),
    ("K", 0x4B),
    ("L", 0x4C),
    ("M", 0x4D),
    ("N", 0x4E),
    ("O", 0x4F),
    ("P", 0x50),
    ("Q", 0x51),
    ("R", 0x52),
    ("S", 0x53),
    ("T", 0x54),
    ("U", 0x55),
    ("V", 0x56),
    ("W", 0x57),
    ("X", 0x58),
    ("Y", 0x59),
    ("Z", 0x5A),
    // Digits
    ("0", 0x30),
    ("1", 0x31),
    ("2", 0x32),
    ("3", 0x33),
    ("4", 0x34),
    ("5", 0x35),
    ("6", 0x36),
    ("7", 0x37),
    ("8", 0x38),
    ("9", 0x39),
    // Function keys
    ("F1", 0x70),
    ("F2", 0x71),
    ("F3", 0x72),
    ("F4", 0x73),
    ("F5", 0x74),
    ("F6", 0x75),
    ("F7", 0x76),
    ("F8", 0x77),
    ("F9", 0x78),
    ("F10", 0x79),
    ("F11", 0x7A),
    ("F12", 0x7B),
    ("F13", 0x7C),
    ("F14", 0x7D),
    ("F15", 0x7E),
    ("F16", 0x7F),
    ("F17", 0x80),
    ("F18", 0x81),
    ("F19", 0x82),
    ("F20", 0x83),
    // Editing and navigation
    ("Esc", 0x1B),
    ("Tab", 0x09),
    ("CapsLock", 0x14),
    ("Space", 0x20),
    ("Backspace", 0x08),
    ("Enter", 0x0D),
    ("Del", 0x2E),
    ("Home", 0x24),
    ("End", 0x23),
    ("PgUp", 0x21),
    ("PgDn", 0x22),
    ("Help", 0x2F),
    ("Clear", 0x0C),
    ("PrtSc", 0x2C),
    ("Ins", 0x2D),
    ("ScrLk", 0x91),
    ("Pause", 0x13),
    // Arrows
    ("↑", 0x26),
    ("↓", 0x28),
    ("←", 0x25),
    ("→", 0x27),
    ("Up", 0x26),
    ("Down", 0x28),
    ("Left", 0x25),
    ("Right", 0x27),
    // Modifiers
    ("Ctrl", 0x11),
    ("Alt", 0x12),
    ("Shift", 0x10),
    ("Left Ctrl", 0xA2),
    ("Right Ctrl", 0xA3),
    ("Left Shift", 0xA0),
    ("Right Shift", 0xA1),
    ("Left Alt", 0xA4),
    ("Right Alt", 0xA5),
    ("Left Win", 0x5B),
    ("Right Win", 0x5C),
    ("Win", 0x5B),
    // OEM punctuation (US layout)
    ("/", 0xBF),
    (";", 0xBA),
    ("=", 0xBB),
    ("-", 0xBD),
    ("[", 0xDB),
    ("]", 0xDD),
    ("'", 0xDE),
    (",", 0xBC),
    (".", 0xBE),
    ("\\", 0xDC),
    ("`", 0xC0),
    // Keypad
    ("Num 0", 0x60),
    ("Num 1", 0x61),
    ("Num 2", 0x62),
    ("Num 3", 0x63),
    ("Num 4", 0x64),
    ("Num 5", 0x65),
    ("Num 6", 0x66),
    ("Num 7", 0x67),
    ("Num 8", 0x68),
    ("Num 9", 0x69),
    ("Num .", 0x6E),
    ("Num *", 0x6A),
    ("Num +", 0x6B),
    ("Num -", 0x6D),
    ("Num /", 0x6F),
    // Windows reports keypad Enter as VK_RETURN with the extended flag set.
    ("Num Enter", 0x0D),
    ("NumLock", 0x90),
];
