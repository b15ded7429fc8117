//! Observable session state.

use std::sync::Arc;

use crate::buffer::OutputBuffer;

/// Immutable snapshot of a session's retained output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutput {
    text: Arc<str>,
    chars: usize,
    total_chars: u64,
}

impl SessionOutput {
    pub fn empty() -> Self {
        Self {
            text: Arc::from(""),
            chars: 0,
            total_chars: 0,
        }
    }

    /// Snapshot the current contents of `buffer`.
    pub fn from_buffer(buffer: &OutputBuffer) -> Self {
        Self {
            text: buffer.snapshot(),
            chars: buffer.char_len(),
            total_chars: buffer.total_chars(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the text, cheap to clone.
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Characters currently retained.
    pub fn char_len(&self) -> usize {
        self.chars
    }

    /// Characters produced since the session started, including any that
    /// have been trimmed away.
    pub fn total_chars(&self) -> u64 {
        self.total_chars
    }

    /// Text produced after a consumer had seen `seen_total` characters.
    ///
    /// If more was produced than is retained, the whole retained text is
    /// returned.
    pub fn since(&self, seen_total: u64) -> &str {
        let fresh = self.total_chars.saturating_sub(seen_total);
        let fresh = usize::try_from(fresh).unwrap_or(usize::MAX);
        if fresh >= self.chars {
            return &self.text;
        }
        let skip = self.chars - fresh;
        let start = self
            .text
            .char_indices()
            .nth(skip)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        &self.text[start..]
    }
}

impl Default for SessionOutput {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything a consumer can observe about a session, published as one
/// value so `running` and `output` can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Constructed, never started.
    #[default]
    Idle,
    /// A process is attached and its output is streaming in.
    Running(SessionOutput),
    /// The process is gone; the output is frozen at its last value.
    Stopped(SessionOutput),
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running(_))
    }

    pub fn output(&self) -> &str {
        match self {
            SessionState::Idle => "",
            SessionState::Running(out) | SessionState::Stopped(out) => out.text(),
        }
    }

    pub fn snapshot(&self) -> Option<&SessionOutput> {
        match self {
            SessionState::Idle => None,
            SessionState::Running(out) | SessionState::Stopped(out) => Some(out),
        }
    }

    /// Running → Stopped, keeping the output. Other states are unchanged.
    pub(crate) fn into_stopped(self) -> Self {
        match self {
            SessionState::Running(out) => SessionState::Stopped(out),
            other => other,
        }
    }
}
