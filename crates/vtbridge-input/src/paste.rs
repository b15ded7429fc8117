//! Paste safety.
//!
//! Pasted text goes straight to the shell, so anything that can execute a
//! command or drive the terminal is flagged: line breaks, escape sequences
//! (including a bracketed-paste terminator that would end the paste early),
//! and 8-bit C1 controls such as CSI and OSC.

use std::fmt;

const BRACKETED_PASTE_START: &str = "\x1b[200~";
const BRACKETED_PASTE_END: &str = "\x1b[201~";

/// Outcome of scanning pasted text. Offsets are byte offsets of the first
/// offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteVerdict {
    Safe,
    /// `\n` or `\r`: the shell would run the line.
    LineBreak { offset: usize },
    /// `ESC[201~` ends a bracketed paste early.
    BracketedPasteEnd { offset: usize },
    /// Any other ESC-introduced sequence.
    EscapeSequence { offset: usize },
    /// U+0080..=U+009F, the 8-bit forms of CSI, OSC, DCS and friends.
    C1Control { offset: usize },
}

impl PasteVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, PasteVerdict::Safe)
    }

    pub fn offset(&self) -> Option<usize> {
        match *self {
            PasteVerdict::Safe => None,
            PasteVerdict::LineBreak { offset }
            | PasteVerdict::BracketedPasteEnd { offset }
            | PasteVerdict::EscapeSequence { offset }
            | PasteVerdict::C1Control { offset } => Some(offset),
        }
    }
}

impl fmt::Display for PasteVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteVerdict::Safe => f.write_str("safe"),
            PasteVerdict::LineBreak { offset } => write!(f, "line break at byte {offset}"),
            PasteVerdict::BracketedPasteEnd { offset } => {
                write!(f, "bracketed paste terminator at byte {offset}")
            }
            PasteVerdict::EscapeSequence { offset } => {
                write!(f, "escape sequence at byte {offset}")
            }
            PasteVerdict::C1Control { offset } => write!(f, "C1 control at byte {offset}"),
        }
    }
}

/// Scan `data` and report the first unsafe construct.
pub fn scan_paste(data: &str) -> PasteVerdict {
    for (offset, c) in data.char_indices() {
        match c {
            '\n' | '\r' => return PasteVerdict::LineBreak { offset },
            '\x1b' if data[offset..].starts_with(BRACKETED_PASTE_END) => {
                return PasteVerdict::BracketedPasteEnd { offset };
            }
            '\x1b' => return PasteVerdict::EscapeSequence { offset },
            '\u{80}'..='\u{9f}' => return PasteVerdict::C1Control { offset },
            _ => {}
        }
    }
    PasteVerdict::Safe
}

/// `true` when `data` can be pasted without side effects.
pub fn is_paste_safe(data: &str) -> bool {
    scan_paste(data).is_safe()
}

/// Bytes to send for a paste, wrapped in `ESC[200~ ... ESC[201~` when the
/// application enabled bracketed paste.
pub fn encode_paste(text: &str, bracketed: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    if bracketed {
        let mut out = String::with_capacity(
            BRACKETED_PASTE_START.len() + text.len() + BRACKETED_PASTE_END.len(),
        );
        out.push_str(BRACKETED_PASTE_START);
        out.push_str(text);
        out.push_str(BRACKETED_PASTE_END);
        out
    } else {
        text.to_string()
    }
}
