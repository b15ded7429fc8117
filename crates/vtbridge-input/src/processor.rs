use std::sync::Arc;

use tracing::{debug, warn};

use crate::bridge::InputBridge;
use crate::keys::KeyEvent;
use crate::paste::{encode_paste, scan_paste, PasteVerdict};

/// The result of processing a key or paste event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Send these bytes to the terminal session.
    TerminalInput(String),
    /// The paste was refused by the safety scanner.
    Rejected(PasteVerdict),
    /// Nothing to send (modifier-only press, release, empty paste).
    Consumed,
}

/// Routes key and paste events into bytes for a terminal session.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    bridge: Arc<InputBridge>,
    bracketed_paste: bool,
    reject_unsafe_paste: bool,
}

impl InputProcessor {
    pub fn new(bridge: Arc<InputBridge>) -> Self {
        Self {
            bridge,
            bracketed_paste: false,
            reject_unsafe_paste: true,
        }
    }

    pub fn bridge(&self) -> &Arc<InputBridge> {
        &self.bridge
    }

    pub fn set_bracketed_paste(&mut self, enabled: bool) {
        self.bracketed_paste = enabled;
    }

    pub fn bracketed_paste(&self) -> bool {
        self.bracketed_paste
    }

    pub fn set_reject_unsafe_paste(&mut self, enabled: bool) {
        self.reject_unsafe_paste = enabled;
    }

    /// Encode a key event through the bridge's encoder.
    pub fn process_key(&self, event: &KeyEvent) -> InputResult {
        match self.bridge.encode_event(event) {
            Some(seq) => InputResult::TerminalInput(seq),
            None => InputResult::Consumed,
        }
    }

    /// Check and encode pasted text.
    ///
    /// Line breaks are harmless inside a bracketed paste, where the shell
    /// does not execute them; every other finding rejects the paste when
    /// rejection is enabled.
    pub fn process_paste(&self, text: &str) -> InputResult {
        if text.is_empty() {
            return InputResult::Consumed;
        }

        let verdict = scan_paste(text);
        let tolerated = self.bracketed_paste && matches!(verdict, PasteVerdict::LineBreak { .. });
        if !verdict.is_safe() && !tolerated {
            if self.reject_unsafe_paste {
                warn!(%verdict, bytes = text.len(), "paste rejected");
                return InputResult::Rejected(verdict);
            }
            debug!(%verdict, "forwarding unsafe paste");
        }

        InputResult::TerminalInput(encode_paste(text, self.bracketed_paste))
    }
}
