//! Legacy xterm key encoding.

use super::{EncoderOptions, Key, KeyAction, KeyEvent, Modifiers};

const ESC: &str = "\x1b";

pub(super) fn encode(event: &KeyEvent, options: &EncoderOptions) -> Option<String> {
    // Legacy streams have no way to express a key release.
    if event.action == KeyAction::Release {
        return None;
    }

    let mods = event.mods.active();
    let alt = mods.contains(Modifiers::ALT) && options.alt_sends_escape;
    let ctrl = mods.contains(Modifiers::CTRL);

    let seq = match event.key {
        k if k.is_modifier() || k.is_lock() => return None,

        Key::Enter => alt_prefixed(alt, "\r"),
        Key::NumpadEnter if options.keypad_application && mods.is_empty() => ss3('M'),
        Key::NumpadEnter => alt_prefixed(alt, "\r"),
        Key::Tab if mods == Modifiers::SHIFT => format!("{ESC}[Z"),
        Key::Tab if mods.contains(Modifiers::SHIFT) => csi_with_mods('Z', mods),
        Key::Tab => alt_prefixed(alt, "\t"),
        Key::Backspace if ctrl => alt_prefixed(alt, "\x08"),
        Key::Backspace => alt_prefixed(alt, "\x7f"),
        Key::Escape => alt_prefixed(alt, ESC),

        Key::ArrowUp => cursor('A', mods, options),
        Key::ArrowDown => cursor('B', mods, options),
        Key::ArrowRight => cursor('C', mods, options),
        Key::ArrowLeft => cursor('D', mods, options),
        Key::Home => cursor('H', mods, options),
        Key::End => cursor('F', mods, options),

        Key::Insert => csi_tilde(2, mods),
        Key::Delete => csi_tilde(3, mods),
        Key::PageUp => csi_tilde(5, mods),
        Key::PageDown => csi_tilde(6, mods),
        Key::Help => csi_tilde(28, mods),

        k => {
            if let Some(n) = k.function_number() {
                return Some(function_key(n, mods));
            }
            if k.is_numpad() && options.keypad_application && mods.is_empty() {
                if let Some(c) = keypad_final(k) {
                    return Some(ss3(c));
                }
            }
            return printable(event, mods, alt);
        }
    };
    Some(seq)
}

/// Text-producing keys: Ctrl maps to C0 controls, Alt prefixes ESC.
fn printable(event: &KeyEvent, mods: Modifiers, alt: bool) -> Option<String> {
    // Super-modified text belongs to the host, not the terminal.
    if mods.contains(Modifiers::SUPER) {
        return None;
    }

    let text = event.printable_text()?;

    if mods.contains(Modifiers::CTRL) {
        let byte = single_char(&text)
            .and_then(ctrl_byte)
            .or_else(|| event.key.base_char().and_then(ctrl_byte));
        if let Some(byte) = byte {
            return Some(alt_prefixed(alt, char::from(byte).encode_utf8(&mut [0; 4])));
        }
    }

    Some(alt_prefixed(alt, &text))
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Control byte xterm sends for Ctrl+`c`.
pub(super) fn ctrl_byte(c: char) -> Option<u8> {
    let byte = match c {
        '@' | ' ' | '2' => 0x00,
        'a'..='z' => c as u8 - b'a' + 1,
        'A'..='Z' => c as u8 - b'A' + 1,
        '[' | '3' => 0x1b,
        '\\' | '4' => 0x1c,
        ']' | '5' => 0x1d,
        '^' | '~' | '6' => 0x1e,
        '_' | '/' | '-' | '7' => 0x1f,
        '?' | '8' => 0x7f,
        // Already a control character.
        c if c.is_ascii_control() => c as u8,
        _ => return None,
    };
    Some(byte)
}

fn alt_prefixed(alt: bool, s: &str) -> String {
    if alt {
        format!("{ESC}{s}")
    } else {
        s.to_string()
    }
}

fn ss3(final_byte: char) -> String {
    format!("{ESC}O{final_byte}")
}

fn csi_with_mods(final_byte: char, mods: Modifiers) -> String {
    format!("{ESC}[1;{}{final_byte}", mods.xterm_param())
}

fn cursor(final_byte: char, mods: Modifiers, options: &EncoderOptions) -> String {
    if !mods.is_empty() {
        csi_with_mods(final_byte, mods)
    } else if options.cursor_key_application {
        ss3(final_byte)
    } else {
        format!("{ESC}[{final_byte}")
    }
}

fn csi_tilde(code: u16, mods: Modifiers) -> String {
    if mods.is_empty() {
        format!("{ESC}[{code}~")
    } else {
        format!("{ESC}[{code};{}~", mods.xterm_param())
    }
}

fn function_key(n: u8, mods: Modifiers) -> String {
    match n {
        1..=4 => {
            let final_byte = char::from(b'P' + (n - 1));
            if mods.is_empty() {
                ss3(final_byte)
            } else {
                csi_with_mods(final_byte, mods)
            }
        }
        5 => csi_tilde(15, mods),
        6 => csi_tilde(17, mods),
        7 => csi_tilde(18, mods),
        8 => csi_tilde(19, mods),
        9 => csi_tilde(20, mods),
        10 => csi_tilde(21, mods),
        11 => csi_tilde(23, mods),
        _ => csi_tilde(24, mods),
    }
}

/// SS3 final byte for a keypad key in application mode.
fn keypad_final(key: Key) -> Option<char> {
    let c = match key {
        Key::NumpadAdd => 'k',
        Key::NumpadDecimal => 'n',
        Key::NumpadDivide => 'o',
        Key::NumpadEqual => 'X',
        Key::NumpadMultiply => 'j',
        Key::NumpadSubtract => 'm',
        k => {
            let digit = k.base_char()?.to_digit(10)?;
            char::from(b'p' + digit as u8)
        }
    };
    Some(c)
}
