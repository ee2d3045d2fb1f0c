//! X11 KeySym values (`X11/keysymdef.h`) for Linux and other Unix targets.
//!
//! Letters use the lower-case KeySym, which is what the server reports for an
//! unshifted key press.  `Ctrl`, `Alt` and `Shift` resolve to the left-hand
//! KeySym; `Super`, `Win` and `Cmd` all name the left Super key so shortcut
//! files from the other platforms keep working.

/// Pressed bit reported by [`crate::input::PressedKeys`] on this platform.
pub const PRESSED_MASK: i32 = 0x0001;

/// Key name to X11 KeySym.
pub const KEY_TABLE: &[(&str, i32)] = &[
    ("A", 0x61),
    ("B", 0x62),
    ("C", 0x63),
    ("D", 0x64),
    ("E", 0x65),
    ("F", 0x66),
    ("G", 0x67),
    ("H", 0x68),
    ("I", 0x69),
    ("J", 0x6A),
    ("K", 0x6B),
    ("L", 0x6C),
    ("M", 0x6D),
    ("N", 0x6E),
    ("O", 0x6F),
    ("P", 0x70),
    ("Q", 0x71),
    ("R", 0x72),
    ("S", 0x73),
    ("T", 0x74),
    ("U", 0x75),
    ("V", 0x76),
    ("W", 0x77),
    ("X", 0x78),
    ("Y", 0x79),
    ("Z", 0x7A),
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
    ("F1", 0xFFBE),
    ("F2", 0xFFBF),
    ("F3", 0xFFC0),
    ("F4", 0xFFC1),
    ("F5", 0xFFC2),
    ("F6", 0xFFC3),
    ("F7", 0xFFC4),
    ("F8", 0xFFC5),
    ("F9", 0xFFC6),
    ("F10", 0xFFC7),
    ("F11", 0xFFC8),
    ("F12", 0xFFC9),
    ("F13", 0xFFCA),
    ("F14", 0xFFCB),
    ("F15", 0xFFCC),
    ("F16", 0xFFCD),
    ("F17", 0xFFCE),
    ("F18", 0xFFCF),
    ("F19", 0xFFD0),
    ("F20", 0xFFD1),
    ("Esc", 0xFF1B),
    ("Tab", 0xFF09),
    ("CapsLock", 0xFFE5),
    ("Space", 0x20),
    ("Backspace", 0xFF08),
    ("Enter", 0xFF0D),
    ("Del", 0xFFFF),
    ("Home", 0xFF50),
    ("End", 0xFF57),
    ("PgUp", 0xFF55),
    ("PgDn", 0xFF56),
    ("Help", 0xFF6A),
    ("Clear", 0xFF0B),
    ("PrtSc", 0xFF61),
    ("Ins", 0xFF63),
    ("ScrLk", 0xFF14),
    ("Pause", 0xFF13),
    ("↑", 0xFF52),
    ("↓", 0xFF54),
    ("←", 0xFF51),
    ("→", 0xFF53),
    ("Up", 0xFF52),
    ("Down", 0xFF54),
    ("Left", 0xFF51),
    ("Right", 0xFF53),
    ("Ctrl", 0xFFE3),
    ("Alt", 0xFFE9),
    ("Shift", 0xFFE1),
    ("Left Ctrl", 0xFFE3),
    ("Right Ctrl", 0xFFE4),
    ("Left Shift", 0xFFE1),
    ("Right Shift", 0xFFE2),
    ("Left Alt", 0xFFE9),
    ("Right Alt", 0xFFEA),
    ("Super", 0xFFEB),
    ("Left Super", 0xFFEB),
    ("Right Super", 0xFFEC),
    ("Win", 0xFFEB),
    ("Left Win", 0xFFEB),
    ("Right Win", 0xFFEC),
    ("Cmd", 0xFFEB),
    ("Left Cmd", 0xFFEB),
    ("Right Cmd", 0xFFEC),
    ("/", 0x2F),
    (";", 0x3B),
    ("=", 0x3D),
    ("-", 0x2D),
    ("[", 0x5B),
    ("]", 0x5D),
    ("'", 0x27),
    (",", 0x2C),
    (".", 0x2E),
    ("\\", 0x5C),
    ("`", 0x60),
    ("Num 0", 0xFFB0),
    ("Num 1", 0xFFB1),
    ("Num 2", 0xFFB2),
    ("Num 3", 0xFFB3),
    ("Num 4", 0xFFB4),
    ("Num 5", 0xFFB5),
    ("Num 6", 0xFFB6),
    ("Num 7", 0xFFB7),
    ("Num 8", 0xFFB8),
    ("Num 9", 0xFFB9),
    ("Num .", 0xFFAE),
    ("Num *", 0xFFAA),
    ("Num +", 0xFFAB),
    ("Num -", 0xFFAD),
    ("Num /", 0xFFAF),
    ("Num Enter", 0xFF8D),
    ("NumLock", 0xFF7F),
];
