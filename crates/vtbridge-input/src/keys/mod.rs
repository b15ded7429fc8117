//! Key encoding: turns physical key events into the bytes a terminal
//! application expects.
//!
//! [`KeyEncoder`] is the owned encoder resource. It speaks legacy xterm
//! encoding by default and the kitty keyboard protocol's disambiguation
//! level when [`EncoderOptions::kitty_disambiguate`] is set.

mod code;
mod encoder;
mod event;
mod kitty;
mod legacy;
mod mods;

pub use code::Key;
pub use encoder::{EncoderOptions, KeyEncoder};
pub use event::{KeyAction, KeyEvent};
pub use mods::Modifiers;

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> KeyEncoder {
        KeyEncoder::new(EncoderOptions::default()).unwrap()
    }

    fn encoder_with(options: EncoderOptions) -> KeyEncoder {
        KeyEncoder::new(options).unwrap()
    }

    fn enc(key: Key, mods: Modifiers) -> Option<String> {
        encoder().encode(&KeyEvent::press(key).with_mods(mods))
    }

    fn plain(key: Key) -> Option<String> {
        enc(key, Modifiers::empty())
    }

    #[test]
    fn enter_is_carriage_return() {
        assert_eq!(plain(Key::Enter).as_deref(), Some("\r"));
        assert_eq!(plain(Key::NumpadEnter).as_deref(), Some("\r"));
    }

    #[test]
    fn editing_keys() {
        assert_eq!(plain(Key::Tab).as_deref(), Some("\t"));
        assert_eq!(plain(Key::Backspace).as_deref(), Some("\x7f"));
        assert_eq!(plain(Key::Escape).as_deref(), Some("\x1b"));
        assert_eq!(plain(Key::Space).as_deref(), Some(" "));
        assert_eq!(plain(Key::Delete).as_deref(), Some("\x1b[3~"));
        assert_eq!(plain(Key::Insert).as_deref(), Some("\x1b[2~"));
    }

    #[test]
    fn shift_tab_is_backtab() {
        assert_eq!(enc(Key::Tab, Modifiers::SHIFT).as_deref(), Some("\x1b[Z"));
        assert_eq!(
            enc(Key::Tab, Modifiers::SHIFT | Modifiers::CTRL).as_deref(),
            Some("\x1b[1;6Z")
        );
    }

    #[test]
    fn ctrl_backspace_is_bs() {
        assert_eq!(enc(Key::Backspace, Modifiers::CTRL).as_deref(), Some("\x08"));
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(plain(Key::ArrowUp).as_deref(), Some("\x1b[A"));
        assert_eq!(plain(Key::ArrowDown).as_deref(), Some("\x1b[B"));
        assert_eq!(plain(Key::ArrowRight).as_deref(), Some("\x1b[C"));
        assert_eq!(plain(Key::ArrowLeft).as_deref(), Some("\x1b[D"));
        assert_eq!(plain(Key::Home).as_deref(), Some("\x1b[H"));
        assert_eq!(plain(Key::End).as_deref(), Some("\x1b[F"));
    }

    #[test]
    fn modified_arrows_carry_xterm_parameter() {
        assert_eq!(enc(Key::ArrowUp, Modifiers::SHIFT).as_deref(), Some("\x1b[1;2A"));
        assert_eq!(enc(Key::ArrowLeft, Modifiers::ALT).as_deref(), Some("\x1b[1;3D"));
        assert_eq!(enc(Key::ArrowRight, Modifiers::CTRL).as_deref(), Some("\x1b[1;5C"));
        assert_eq!(enc(Key::PageUp, Modifiers::CTRL).as_deref(), Some("\x1b[5;5~"));
    }

    #[test]
    fn lock_modifiers_do_not_change_sequences() {
        let mods = Modifiers::CAPS_LOCK | Modifiers::NUM_LOCK;
        assert_eq!(enc(Key::ArrowUp, mods).as_deref(), Some("\x1b[A"));
        assert_eq!(enc(Key::Enter, mods).as_deref(), Some("\r"));
    }

    #[test]
    fn cursor_key_application_mode() {
        let enc = encoder_with(EncoderOptions {
            cursor_key_application: true,
            ..EncoderOptions::default()
        });
        assert_eq!(
            enc.encode(&KeyEvent::press(Key::ArrowUp)).as_deref(),
            Some("\x1bOA")
        );
        assert_eq!(
            enc.encode(&KeyEvent::press(Key::Home)).as_deref(),
            Some("\x1bOH")
        );
        // Modified keys stay CSI.
        let event = KeyEvent::press(Key::ArrowUp).with_mods(Modifiers::CTRL);
        assert_eq!(enc.encode(&event).as_deref(), Some("\x1b[1;5A"));
    }

    #[test]
    fn function_keys() {
        assert_eq!(plain(Key::F1).as_deref(), Some("\x1bOP"));
        assert_eq!(plain(Key::F4).as_deref(), Some("\x1bOS"));
        assert_eq!(plain(Key::F5).as_deref(), Some("\x1b[15~"));
        assert_eq!(plain(Key::F11).as_deref(), Some("\x1b[23~"));
        assert_eq!(plain(Key::F12).as_deref(), Some("\x1b[24~"));
        assert_eq!(enc(Key::F1, Modifiers::SHIFT).as_deref(), Some("\x1b[1;2P"));
        assert_eq!(enc(Key::F5, Modifiers::CTRL).as_deref(), Some("\x1b[15;5~"));
    }

    #[test]
    fn letters_without_text_use_us_layout() {
        assert_eq!(plain(Key::KeyA).as_deref(), Some("a"));
        assert_eq!(enc(Key::KeyA, Modifiers::SHIFT).as_deref(), Some("A"));
        assert_eq!(enc(Key::KeyA, Modifiers::CAPS_LOCK).as_deref(), Some("A"));
        assert_eq!(enc(Key::Digit2, Modifiers::SHIFT).as_deref(), Some("@"));
    }

    #[test]
    fn event_text_wins_over_layout() {
        let event = KeyEvent::press(Key::KeyQ).with_text("a");
        assert_eq!(encoder().encode(&event).as_deref(), Some("a"));

        let event = KeyEvent::press(Key::Unidentified).with_text("é");
        assert_eq!(encoder().encode(&event).as_deref(), Some("é"));
    }

    #[test]
    fn ctrl_letters_become_control_bytes() {
        assert_eq!(enc(Key::KeyC, Modifiers::CTRL).as_deref(), Some("\x03"));
        assert_eq!(enc(Key::KeyD, Modifiers::CTRL).as_deref(), Some("\x04"));
        assert_eq!(enc(Key::KeyZ, Modifiers::CTRL).as_deref(), Some("\x1a"));
        assert_eq!(
            enc(Key::KeyC, Modifiers::CTRL | Modifiers::SHIFT).as_deref(),
            Some("\x03")
        );
    }

    #[test]
    fn ctrl_symbols() {
        assert_eq!(enc(Key::Space, Modifiers::CTRL).as_deref(), Some("\x00"));
        assert_eq!(enc(Key::BracketLeft, Modifiers::CTRL).as_deref(), Some("\x1b"));
        assert_eq!(enc(Key::Backslash, Modifiers::CTRL).as_deref(), Some("\x1c"));
        assert_eq!(enc(Key::BracketRight, Modifiers::CTRL).as_deref(), Some("\x1d"));
        assert_eq!(enc(Key::Slash, Modifiers::CTRL).as_deref(), Some("\x1f"));
    }

    #[test]
    fn ctrl_uses_key_when_text_has_no_control_form() {
        // A non-US layout reports "ф" for the C key.
        let event = KeyEvent::press(Key::KeyC)
            .with_mods(Modifiers::CTRL)
            .with_text("ф");
        assert_eq!(encoder().encode(&event).as_deref(), Some("\x03"));
    }

    #[test]
    fn alt_prefixes_escape() {
        assert_eq!(enc(Key::KeyD, Modifiers::ALT).as_deref(), Some("\x1bd"));
        assert_eq!(enc(Key::Enter, Modifiers::ALT).as_deref(), Some("\x1b\r"));
        assert_eq!(
            enc(Key::KeyC, Modifiers::ALT | Modifiers::CTRL).as_deref(),
            Some("\x1b\x03")
        );
    }

    #[test]
    fn alt_without_escape_prefix() {
        let enc = encoder_with(EncoderOptions {
            alt_sends_escape: false,
            ..EncoderOptions::default()
        });
        let event = KeyEvent::press(Key::KeyD).with_mods(Modifiers::ALT);
        assert_eq!(enc.encode(&event).as_deref(), Some("d"));
    }

    #[test]
    fn modifier_only_and_lock_keys_encode_nothing() {
        for key in [
            Key::ShiftLeft,
            Key::ControlRight,
            Key::AltLeft,
            Key::MetaRight,
            Key::CapsLock,
            Key::NumLock,
        ] {
            assert_eq!(plain(key), None, "{key}");
        }
    }

    #[test]
    fn unidentified_without_text_encodes_nothing() {
        assert_eq!(plain(Key::Unidentified), None);
    }

    #[test]
    fn super_text_is_not_sent() {
        assert_eq!(enc(Key::KeyC, Modifiers::SUPER), None);
    }

    #[test]
    fn release_encodes_nothing() {
        let event = KeyEvent::press(Key::KeyA).with_action(KeyAction::Release);
        assert_eq!(encoder().encode(&event), None);
        let event = KeyEvent::press(Key::KeyA).with_action(KeyAction::Repeat);
        assert_eq!(encoder().encode(&event).as_deref(), Some("a"));
    }

    #[test]
    fn keypad_modes() {
        assert_eq!(plain(Key::Numpad5).as_deref(), Some("5"));
        assert_eq!(plain(Key::NumpadAdd).as_deref(), Some("+"));

        let enc = encoder_with(EncoderOptions {
            keypad_application: true,
            ..EncoderOptions::default()
        });
        let code = |key| enc.encode(&KeyEvent::press(key));
        assert_eq!(code(Key::Numpad0).as_deref(), Some("\x1bOp"));
        assert_eq!(code(Key::Numpad9).as_deref(), Some("\x1bOy"));
        assert_eq!(code(Key::NumpadEnter).as_deref(), Some("\x1bOM"));
        assert_eq!(code(Key::NumpadAdd).as_deref(), Some("\x1bOk"));
    }

    #[test]
    fn kitty_disambiguates_escape_and_modified_text() {
        let enc = encoder_with(EncoderOptions {
            kitty_disambiguate: true,
            ..EncoderOptions::default()
        });
        let code = |key, mods| enc.encode(&KeyEvent::press(key).with_mods(mods));

        assert_eq!(code(Key::Escape, Modifiers::empty()).as_deref(), Some("\x1b[27u"));
        assert_eq!(code(Key::KeyC, Modifiers::CTRL).as_deref(), Some("\x1b[99;5u"));
        assert_eq!(code(Key::KeyA, Modifiers::ALT).as_deref(), Some("\x1b[97;3u"));
        assert_eq!(
            code(Key::KeyA, Modifiers::CTRL | Modifiers::SHIFT).as_deref(),
            Some("\x1b[97;6u")
        );
        // Plain and shifted text is unchanged.
        assert_eq!(code(Key::KeyA, Modifiers::empty()).as_deref(), Some("a"));
        assert_eq!(code(Key::KeyA, Modifiers::SHIFT).as_deref(), Some("A"));
        // Enter, Tab, Backspace and functional keys keep legacy bytes.
        assert_eq!(code(Key::Enter, Modifiers::empty()).as_deref(), Some("\r"));
        assert_eq!(code(Key::Backspace, Modifiers::CTRL).as_deref(), Some("\x08"));
        assert_eq!(code(Key::ArrowUp, Modifiers::CTRL).as_deref(), Some("\x1b[1;5A"));
    }

    #[test]
    fn encode_raw_uses_boundary_values() {
        let enc = encoder();
        assert_eq!(
            enc.encode_raw(Key::Enter.code(), 0, None).unwrap().as_deref(),
            Some("\r")
        );
        // Ctrl is bit 1.
        assert_eq!(
            enc.encode_raw(Key::KeyC.code(), 0b10, None).unwrap().as_deref(),
            Some("\x03")
        );
        assert_eq!(
            enc.encode_raw(Key::KeyA.code(), 0, Some("x")).unwrap().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn encode_raw_rejects_unknown_codes() {
        let err = encoder().encode_raw(9999, 0, None).unwrap_err();
        assert!(matches!(
            err,
            vtbridge_common::EncoderError::UnknownKey(9999)
        ));
    }

    #[test]
    fn encoders_get_distinct_ids() {
        let a = encoder();
        let b = encoder();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn options_can_change_after_creation() {
        let mut enc = encoder();
        enc.set_options(EncoderOptions {
            cursor_key_application: true,
            ..EncoderOptions::default()
        });
        assert!(enc.options().cursor_key_application);
        assert_eq!(
            enc.encode(&KeyEvent::press(Key::ArrowDown)).as_deref(),
            Some("\x1bOB")
        );
    }
}
