//! The background reader loop: drains process output into the session's
//! bounded buffer and republishes it after every chunk.

use std::io::{ErrorKind, Read};
use std::sync::Arc;

use tracing::{debug, trace};

use super::state::SessionOutput;
use super::Shared;
use crate::buffer::{OutputBuffer, Utf8Decoder};

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Eof,
    ReadError,
    Stopped,
}

/// Run until EOF, a read error, or the session leaving run `generation`.
/// Always ends with cleanup.
pub(super) fn run(
    shared: Arc<Shared>,
    generation: u64,
    mut reader: Box<dyn Read + Send>,
    chunk_size: usize,
    max_chars: usize,
) {
    let session = shared.id.short().to_string();
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut decoder = Utf8Decoder::new();
    let mut output = OutputBuffer::new(max_chars);

    debug!(
        session = %session,
        generation,
        chunk_size,
        max_chars = output.max_chars(),
        "reader loop started"
    );

    let exit = loop {
        if !shared.is_current(generation) {
            break Exit::Stopped;
        }

        match reader.read(&mut buf) {
            Ok(0) => break Exit::Eof,
            Ok(n) => {
                let text = decoder.decode(&buf[..n]);
                if text.is_empty() {
                    continue;
                }
                let trimmed = output.push_str(&text);
                if trimmed > 0 {
                    trace!(session = %session, trimmed, "output trimmed from front");
                }
                shared.publish(generation, SessionOutput::from_buffer(&output));
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                // A PTY master reports EIO once the child side closes.
                debug!(session = %session, "read ended with error: {e}");
                break Exit::ReadError;
            }
        }
    };

    let tail = decoder.finish();
    if !tail.is_empty() {
        output.push_str(&tail);
        shared.publish(generation, SessionOutput::from_buffer(&output));
    }

    drop(reader);
    debug!(session = %session, ?exit, total_chars = output.total_chars(), "reader loop finished");
    shared.finish(generation);
}
