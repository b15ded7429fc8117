use super::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyAction {
    #[default]
    Press,
    Repeat,
    Release,
}

/// One keyboard event as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
    pub mods: Modifiers,
    /// Text the platform produced for this event, if any. Takes precedence
    /// over the key's US-layout character.
    pub text: Option<String>,
}

impl KeyEvent {
    /// A press of `key` with no modifiers and no text.
    pub fn press(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Press,
            mods: Modifiers::empty(),
            text: None,
        }
    }

    pub fn with_mods(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_action(mut self, action: KeyAction) -> Self {
        self.action = action;
        self
    }

    /// Text for a printable key: the event's own text when present,
    /// otherwise the key's character under the current Shift state.
    pub(crate) fn printable_text(&self) -> Option<String> {
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            return Some(text.to_string());
        }
        let shifted = self.mods.contains(Modifiers::SHIFT);
        let caps = self.mods.contains(Modifiers::CAPS_LOCK);
        let c = if shifted {
            self.key.shifted_char()
        } else {
            self.key.base_char()
        }?;
        let c = if caps && c.is_ascii_alphabetic() {
            if shifted {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        } else {
            c
        };
        Some(c.to_string())
    }
}
