//! Spawned process handles.

use std::io::{Read, Write};

use vtbridge_common::SessionError;

/// Default terminal columns.
pub const DEFAULT_COLS: u16 = 80;

/// Default terminal rows.
pub const DEFAULT_ROWS: u16 = 24;

/// How the child's standard streams are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// stdin is a pipe; stdout and stderr share a single pipe.
    #[default]
    Pipe,
    /// All three streams are the slave side of a pseudo-terminal.
    Pty { cols: u16, rows: u16 },
}

impl Backend {
    pub fn pty() -> Self {
        Backend::Pty {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }
}

/// Lifecycle control over a spawned child.
pub trait ProcessHandle: Send {
    /// OS process id, if the backend knows it.
    fn pid(&self) -> Option<u32>;

    /// Kill the child if it is still alive and reap it.
    ///
    /// Safe to call on a child that already exited.
    fn terminate(&mut self) -> std::io::Result<()>;

    /// Inform the child that the terminal size changed.
    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SessionError>;
}

/// The three exclusively owned handles of a running child.
pub struct SpawnedProcess {
    /// Merged stdout/stderr.
    pub reader: Box<dyn Read + Send>,
    /// The child's stdin.
    pub writer: Box<dyn Write + Send>,
    pub handle: Box<dyn ProcessHandle>,
}

impl std::fmt::Debug for SpawnedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpawnedProcess")
            .field("pid", &self.handle.pid())
            .finish_non_exhaustive()
    }
}
