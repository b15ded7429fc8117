//! Physical key codes.
//!
//! The numeric value of each [`Key`] is the code accepted on the raw
//! `encode_key(u32, u8, Option<&str>)` boundary. Codes follow the W3C
//! `KeyboardEvent.code` list in a fixed order, with `0` reserved for an
//! unidentified key.

macro_rules! keys {
    ($($variant:ident = $code:literal => $name:literal,)*) => {
        /// A physical key, independent of keyboard layout.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum Key {
            $($variant = $code,)*
        }

        impl Key {
            /// Every key, indexed by its code.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Canonical snake_case name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }
        }
    };
}

keys! {
    Unidentified = 0 => "unidentified",

    // Writing system keys
    Backquote = 1 => "backquote",
    Backslash = 2 => "backslash",
    BracketLeft = 3 => "bracket_left",
    BracketRight = 4 => "bracket_right",
    Comma = 5 => "comma",
    Digit0 = 6 => "digit_0",
    Digit1 = 7 => "digit_1",
    Digit2 = 8 => "digit_2",
    Digit3 = 9 => "digit_3",
    Digit4 = 10 => "digit_4",
    Digit5 = 11 => "digit_5",
    Digit6 = 12 => "digit_6",
    Digit7 = 13 => "digit_7",
    Digit8 = 14 => "digit_8",
    Digit9 = 15 => "digit_9",
    Equal = 16 => "equal",
    IntlBackslash = 17 => "intl_backslash",
    IntlRo = 18 => "intl_ro",
    IntlYen = 19 => "intl_yen",
    KeyA = 20 => "key_a",
    KeyB = 21 => "key_b",
    KeyC = 22 => "key_c",
    KeyD = 23 => "key_d",
    KeyE = 24 => "key_e",
    KeyF = 25 => "key_f",
    KeyG = 26 => "key_g",
    KeyH = 27 => "key_h",
    KeyI = 28 => "key_i",
    KeyJ = 29 => "key_j",
    KeyK = 30 => "key_k",
    KeyL = 31 => "key_l",
    KeyM = 32 => "key_m",
    KeyN = 33 => "key_n",
    KeyO = 34 => "key_o",
    KeyP = 35 => "key_p",
    KeyQ = 36 => "key_q",
    KeyR = 37 => "key_r",
    KeyS = 38 => "key_s",
    KeyT = 39 => "key_t",
    KeyU = 40 => "key_u",
    KeyV = 41 => "key_v",
    KeyW = 42 => "key_w",
    KeyX = 43 => "key_x",
    KeyY = 44 => "key_y",
    KeyZ = 45 => "key_z",
    Minus = 46 => "minus",
    Period = 47 => "period",
    Quote = 48 => "quote",
    Semicolon = 49 => "semicolon",
    Slash = 50 => "slash",

    // Functional keys
    AltLeft = 51 => "alt_left",
    AltRight = 52 => "alt_right",
    Backspace = 53 => "backspace",
    CapsLock = 54 => "caps_lock",
    ContextMenu = 55 => "context_menu",
    ControlLeft = 56 => "control_left",
    ControlRight = 57 => "control_right",
    Enter = 58 => "enter",
    MetaLeft = 59 => "meta_left",
    MetaRight = 60 => "meta_right",
    ShiftLeft = 61 => "shift_left",
    ShiftRight = 62 => "shift_right",
    Space = 63 => "space",
    Tab = 64 => "tab",
    Convert = 65 => "convert",
    KanaMode = 66 => "kana_mode",
    NonConvert = 67 => "non_convert",

    // Control pad
    Delete = 68 => "delete",
    End = 69 => "end",
    Help = 70 => "help",
    Home = 71 => "home",
    Insert = 72 => "insert",
    PageDown = 73 => "page_down",
    PageUp = 74 => "page_up",

    // Arrow pad
    ArrowDown = 75 => "arrow_down",
    ArrowLeft = 76 => "arrow_left",
    ArrowRight = 77 => "arrow_right",
    ArrowUp = 78 => "arrow_up",

    // Numpad
    NumLock = 79 => "num_lock",
    Numpad0 = 80 => "numpad_0",
    Numpad1 = 81 => "numpad_1",
    Numpad2 = 82 => "numpad_2",
    Numpad3 = 83 => "numpad_3",
    Numpad4 = 84 => "numpad_4",
    Numpad5 = 85 => "numpad_5",
    Numpad6 = 86 => "numpad_6",
    Numpad7 = 87 => "numpad_7",
    Numpad8 = 88 => "numpad_8",
    Numpad9 = 89 => "numpad_9",
    NumpadAdd = 90 => "numpad_add",
    NumpadDecimal = 91 => "numpad_decimal",
    NumpadDivide = 92 => "numpad_divide",
    NumpadEnter = 93 => "numpad_enter",
    NumpadEqual = 94 => "numpad_equal",
    NumpadMultiply = 95 => "numpad_multiply",
    NumpadSubtract = 96 => "numpad_subtract",

    // Function section
    Escape = 97 => "escape",
    F1 = 98 => "f1",
    F2 = 99 => "f2",
    F3 = 100 => "f3",
    F4 = 101 => "f4",
    F5 = 102 => "f5",
    F6 = 103 => "f6",
    F7 = 104 => "f7",
    F8 = 105 => "f8",
    F9 = 106 => "f9",
    F10 = 107 => "f10",
    F11 = 108 => "f11",
    F12 = 109 => "f12",
}

const LETTERS: [Key; 26] = [
    Key::KeyA, Key::KeyB, Key::KeyC, Key::KeyD, Key::KeyE, Key::KeyF, Key::KeyG,
    Key::KeyH, Key::KeyI, Key::KeyJ, Key::KeyK, Key::KeyL, Key::KeyM, Key::KeyN,
    Key::KeyO, Key::KeyP, Key::KeyQ, Key::KeyR, Key::KeyS, Key::KeyT, Key::KeyU,
    Key::KeyV, Key::KeyW, Key::KeyX, Key::KeyY, Key::KeyZ,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Look up a key by its numeric code.
    pub fn from_code(code: u32) -> Option<Key> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Parse a key name. Accepts canonical names plus common short forms
    /// (`a`, `7`, `up`, `esc`, `pgdn`, ...). Case-insensitive; `-` and `_`
    /// are interchangeable.
    pub fn from_name(name: &str) -> Option<Key> {
        let name = name.trim().to_ascii_lowercase().replace('-', "_");

        if let Some(key) = Self::ALL.iter().find(|k| k.name() == name) {
            return Some(*key);
        }

        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        let key = match name.as_str() {
            "up" => Key::ArrowUp,
            "down" => Key::ArrowDown,
            "left" => Key::ArrowLeft,
            "right" => Key::ArrowRight,
            "esc" => Key::Escape,
            "return" | "ret" => Key::Enter,
            "bs" => Key::Backspace,
            "del" => Key::Delete,
            "ins" => Key::Insert,
            "pgup" | "pageup" => Key::PageUp,
            "pgdn" | "pagedown" => Key::PageDown,
            "shift" => Key::ShiftLeft,
            "ctrl" | "control" => Key::ControlLeft,
            "alt" => Key::AltLeft,
            "meta" | "super" => Key::MetaLeft,
            _ => return None,
        };
        Some(key)
    }

    /// The key that produces `c` on a US layout, shifted or not.
    pub fn from_char(c: char) -> Option<Key> {
        let c = c.to_ascii_lowercase();
        let key = match c {
            'a'..='z' => LETTERS[(c as u8 - b'a') as usize],
            '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
            '`' | '~' => Key::Backquote,
            '\\' | '|' => Key::Backslash,
            '[' | '{' => Key::BracketLeft,
            ']' | '}' => Key::BracketRight,
            ',' | '<' => Key::Comma,
            '=' | '+' => Key::Equal,
            '-' | '_' => Key::Minus,
            '.' | '>' => Key::Period,
            '\'' | '"' => Key::Quote,
            ';' | ':' => Key::Semicolon,
            '/' | '?' => Key::Slash,
            ' ' => Key::Space,
            '!' => Key::Digit1,
            '@' => Key::Digit2,
            '#' => Key::Digit3,
            '$' => Key::Digit4,
            '%' => Key::Digit5,
            '^' => Key::Digit6,
            '&' => Key::Digit7,
            '*' => Key::Digit8,
            '(' => Key::Digit9,
            ')' => Key::Digit0,
            _ => return None,
        };
        Some(key)
    }

    /// Unshifted character on a US layout, for keys that print one.
    pub fn base_char(self) -> Option<char> {
        let c = match self {
            Key::Backquote => '`',
            Key::Backslash => '\\',
            Key::BracketLeft => '[',
            Key::BracketRight => ']',
            Key::Comma => ',',
            Key::Equal => '=',
            Key::Minus => '-',
            Key::Period => '.',
            Key::Quote => '\'',
            Key::Semicolon => ';',
            Key::Slash => '/',
            Key::Space => ' ',
            Key::NumpadAdd => '+',
            Key::NumpadDecimal => '.',
            Key::NumpadDivide => '/',
            Key::NumpadEqual => '=',
            Key::NumpadMultiply => '*',
            Key::NumpadSubtract => '-',
            k if (Key::KeyA..=Key::KeyZ).contains(&k) => {
                char::from(b'a' + (k.code() - Key::KeyA.code()) as u8)
            }
            k if (Key::Digit0..=Key::Digit9).contains(&k) => {
                char::from(b'0' + (k.code() - Key::Digit0.code()) as u8)
            }
            k if (Key::Numpad0..=Key::Numpad9).contains(&k) => {
                char::from(b'0' + (k.code() - Key::Numpad0.code()) as u8)
            }
            _ => return None,
        };
        Some(c)
    }

    /// Character with Shift held on a US layout.
    pub fn shifted_char(self) -> Option<char> {
        let c = match self {
            Key::Backquote => '~',
            Key::Backslash => '|',
            Key::BracketLeft => '{',
            Key::BracketRight => '}',
            Key::Comma => '<',
            Key::Equal => '+',
            Key::Minus => '_',
            Key::Period => '>',
            Key::Quote => '"',
            Key::Semicolon => ':',
            Key::Slash => '?',
            Key::Digit0 => ')',
            Key::Digit1 => '!',
            Key::Digit2 => '@',
            Key::Digit3 => '#',
            Key::Digit4 => '$',
            Key::Digit5 => '%',
            Key::Digit6 => '^',
            Key::Digit7 => '&',
            Key::Digit8 => '*',
            Key::Digit9 => '(',
            k => return k.base_char().map(|c| c.to_ascii_uppercase()),
        };
        Some(c)
    }

    /// Shift, Control, Alt and Meta keys on either side.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::AltLeft
                | Key::AltRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::MetaLeft
                | Key::MetaRight
                | Key::ShiftLeft
                | Key::ShiftRight
        )
    }

    /// Caps Lock and Num Lock.
    pub fn is_lock(self) -> bool {
        matches!(self, Key::CapsLock | Key::NumLock)
    }

    pub fn is_numpad(self) -> bool {
        (Key::Numpad0..=Key::NumpadSubtract).contains(&self)
    }

    /// F-key number, 1 through 12.
    pub fn function_number(self) -> Option<u8> {
        (Key::F1..=Key::F12)
            .contains(&self)
            .then(|| (self.code() - Key::F1.code() + 1) as u8)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
