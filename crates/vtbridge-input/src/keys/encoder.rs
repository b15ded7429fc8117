use tracing::{debug, trace};
use vtbridge_common::{EncoderError, EncoderId};

use super::{kitty, legacy, Key, KeyEvent, Modifiers};

/// Terminal modes that change how keys are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// DECCKM: unmodified cursor keys send SS3 instead of CSI.
    pub cursor_key_application: bool,
    /// DECKPAM: keypad keys send SS3 sequences instead of their characters.
    pub keypad_application: bool,
    /// Alt prefixes the key's bytes with ESC.
    pub alt_sends_escape: bool,
    /// Kitty keyboard protocol, disambiguation level.
    pub kitty_disambiguate: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            cursor_key_application: false,
            keypad_application: false,
            alt_sends_escape: true,
            kitty_disambiguate: false,
        }
    }
}

/// An owned key encoder.
///
/// Creation allocates a process-unique [`EncoderId`]; dropping the value
/// is the only way to destroy it, so an encoder can never be used after
/// destruction or destroyed twice.
#[derive(Debug)]
pub struct KeyEncoder {
    id: EncoderId,
    options: EncoderOptions,
}

impl KeyEncoder {
    pub fn new(options: EncoderOptions) -> Result<Self, EncoderError> {
        let id = EncoderId::next()
            .ok_or_else(|| EncoderError::CreateFailed("encoder id space exhausted".into()))?;
        debug!(encoder = %id, ?options, "key encoder created");
        Ok(Self { id, options })
    }

    pub fn id(&self) -> EncoderId {
        self.id
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Change terminal modes, e.g. after the application toggles DECCKM.
    pub fn set_options(&mut self, options: EncoderOptions) {
        self.options = options;
    }

    /// Encode `event`. `None` when the event has no byte representation
    /// (modifier-only presses, releases, Super shortcuts).
    pub fn encode(&self, event: &KeyEvent) -> Option<String> {
        let seq = if self.options.kitty_disambiguate {
            kitty::encode(event, &self.options)
        } else {
            legacy::encode(event, &self.options)
        }
        .filter(|s| !s.is_empty());

        trace!(
            encoder = %self.id,
            key = %event.key,
            mods = event.mods.bits(),
            produced = seq.is_some(),
            "encoded key"
        );
        seq
    }

    /// Encode a press from raw boundary values.
    pub fn encode_raw(
        &self,
        key_code: u32,
        mods: u8,
        text: Option<&str>,
    ) -> Result<Option<String>, EncoderError> {
        let key = Key::from_code(key_code).ok_or(EncoderError::UnknownKey(key_code))?;
        let event = KeyEvent {
            text: text.map(str::to_string),
            ..KeyEvent::press(key).with_mods(Modifiers::from_raw(mods))
        };
        Ok(self.encode(&event))
    }
}

impl Drop for KeyEncoder {
    fn drop(&mut self) {
        debug!(encoder = %self.id, "key encoder destroyed");
    }
}
