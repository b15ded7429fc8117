//! Bounded output accumulator and incremental UTF-8 decoding.
//!
//! The reader loop feeds raw chunks through [`Utf8Decoder`] and appends the
//! text to an [`OutputBuffer`], which keeps only the most recent
//! `max_chars` characters.

use std::sync::Arc;

/// Append-only text buffer that trims from the front once it holds more
/// than `max_chars` characters.
///
/// Lengths are counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    text: String,
    chars: usize,
    max_chars: usize,
    total_chars: u64,
}

impl OutputBuffer {
    /// Create an empty buffer retaining at most `max_chars` characters
    /// (clamped to at least one).
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            max_chars: max_chars.max(1),
            total_chars: 0,
        }
    }

    /// Append `s`, trimming the oldest characters if the cap is exceeded.
    ///
    /// Returns the number of characters dropped from the front.
    pub fn push_str(&mut self, s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }

        let added = s.chars().count();
        self.text.push_str(s);
        self.chars += added;
        self.total_chars += added as u64;

        if self.chars <= self.max_chars {
            return 0;
        }

        let excess = self.chars - self.max_chars;
        let cut = self
            .text
            .char_indices()
            .nth(excess)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        self.text.drain(..cut);
        self.chars = self.max_chars;
        excess
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters currently retained.
    pub fn char_len(&self) -> usize {
        self.chars
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Characters ever appended, including those trimmed away.
    pub fn total_chars(&self) -> u64 {
        self.total_chars
    }

    /// Immutable copy of the retained text for publishing to consumers.
    pub fn snapshot(&self) -> Arc<str> {
        Arc::from(self.as_str())
    }
}

/// Streaming UTF-8 decoder.
///
/// A multi-byte sequence split across two chunks is held back until the
/// rest arrives. Invalid bytes decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, prefixed by any incomplete tail of the last one.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(bytes);

        let mut out = String::with_capacity(input.len());
        let mut rest: &[u8] = &input;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Truncated sequence at the end of the chunk.
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush a dangling partial sequence at end of stream.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}
