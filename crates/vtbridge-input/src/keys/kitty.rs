//! Kitty keyboard protocol, "disambiguate escape codes" level.
//!
//! Escape and text keys combined with Ctrl, Alt or Super are reported as
//! `CSI code;mods u`. Enter, Tab and Backspace keep their legacy bytes, as
//! does every functional key.

use super::{legacy, EncoderOptions, Key, KeyAction, KeyEvent, Modifiers};

const ESCAPE_CODE: u32 = 27;

pub(super) fn encode(event: &KeyEvent, options: &EncoderOptions) -> Option<String> {
    if event.action == KeyAction::Release {
        return None;
    }

    let mods = event.mods.active();

    if event.key == Key::Escape {
        return Some(csi_u(ESCAPE_CODE, mods));
    }

    let ambiguous = mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER);
    if ambiguous {
        if let Some(code) = text_key_code(event) {
            return Some(csi_u(code, mods));
        }
    }

    legacy::encode(event, options)
}

/// Unshifted codepoint of a text-producing key.
fn text_key_code(event: &KeyEvent) -> Option<u32> {
    if matches!(event.key, Key::Enter | Key::Tab | Key::Backspace) || event.key.is_numpad() {
        return None;
    }
    if let Some(c) = event.key.base_char() {
        return Some(u32::from(c));
    }
    // Keys outside the US layout table report the text they produced.
    let text = event.text.as_deref()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => c.to_lowercase().next().map(u32::from),
        _ => None,
    }
}

fn csi_u(code: u32, mods: Modifiers) -> String {
    if mods.is_empty() {
        format!("\x1b[{code}u")
    } else {
        format!("\x1b[{code};{}u", mods.xterm_param())
    }
}
