//! Keyboard and paste handling configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Wrap pastes in `ESC[200~` / `ESC[201~`.
    pub bracketed_paste: bool,
    /// Drop pastes the safety scanner flags instead of forwarding them.
    pub reject_unsafe_paste: bool,
    /// Send SS3 sequences for cursor keys (DECCKM).
    pub cursor_key_application: bool,
    /// Send SS3 sequences for keypad keys (DECKPAM).
    pub keypad_application: bool,
    /// Prefix Alt-modified keys with ESC.
    pub alt_sends_escape: bool,
    /// Use the kitty keyboard protocol's disambiguation mode.
    pub kitty_disambiguate: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            bracketed_paste: false,
            reject_unsafe_paste: true,
            cursor_key_application: false,
            keypad_application: false,
            alt_sends_escape: true,
            kitty_disambiguate: false,
        }
    }
}
