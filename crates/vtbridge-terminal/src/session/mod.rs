//! Terminal session: one shell process, one reader thread, one observable
//! state value.
//!
//! Consumers never see errors from a session. Spawn and I/O failures are
//! logged and resolved by moving to [`SessionState::Stopped`]; the only
//! signal a UI gets is `is_running` turning false with the output frozen.
//!
//! Writes racing with shutdown are serialized on the writer slot: a write
//! that acquires the slot before cleanup completes normally, and a write
//! that arrives after cleanup has begun is dropped and logged.

mod reader;
mod state;


pub use state::{SessionOutput, SessionState};

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::thread;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use vtbridge_common::{SessionError, SessionId};

use crate::process::{self, Backend, ProcessHandle, SpawnedProcess};
use crate::shell::ShellCommand;

/// Default number of output characters a session retains.
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 100_000;

/// Default number of bytes requested per read.
pub const DEFAULT_READ_CHUNK: usize = 8_192;

/// Tunables fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub backend: Backend,
    pub max_output_chars: usize,
    pub read_chunk_size: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            backend: Backend::Pipe,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
            read_chunk_size: DEFAULT_READ_CHUNK,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the session handle and its reader thread.
pub(crate) struct Shared {
    id: SessionId,
    running: AtomicBool,
    /// Bumped on every `start`; a reader only acts for its own run.
    generation: AtomicU64,
    /// Serializes start and cleanup.
    lifecycle: Mutex<()>,
    writer: Mutex<Option<Box<dyn Write + Send>>>,
    process: Mutex<Option<Box<dyn ProcessHandle>>>,
    state: watch::Sender<SessionState>,
}

impl Shared {
    /// `true` while the run identified by `generation` is the live one.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.running.load(Ordering::Acquire)
            && self.generation.load(Ordering::Acquire) == generation
    }

    /// Replace the published output, unless the run has ended.
    ///
    /// The check happens under the channel's lock, so nothing is published
    /// after cleanup has cleared the running flag.
    pub(crate) fn publish(&self, generation: u64, output: SessionOutput) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            *state = SessionState::Running(output);
            true
        })
    }

    /// Cleanup entry point for the reader thread.
    pub(crate) fn finish(&self, generation: u64) {
        let _guard = lock(&self.lifecycle);
        self.cleanup_locked(generation);
    }

    /// Release every handle of run `generation`. Idempotent.
    ///
    /// Must be called with `lifecycle` held.
    fn cleanup_locked(&self, generation: u64) {
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(session = self.id.short(), generation, "ignoring cleanup for stale run");
            return;
        }

        let was_running = self.running.swap(false, Ordering::AcqRel);
        // Observers must see the stop before any handle goes away.
        self.state
            .send_modify(|state| *state = std::mem::take(state).into_stopped());

        // A write blocked on a stalled child holds the slot; terminating the
        // child first unblocks it.
        let mut writer_busy = false;
        match self.writer.try_lock() {
            Ok(mut slot) => self.close_writer(slot.take()),
            Err(TryLockError::Poisoned(poisoned)) => {
                self.close_writer(poisoned.into_inner().take())
            }
            Err(TryLockError::WouldBlock) => writer_busy = true,
        }

        let process = lock(&self.process).take();
        if let Some(mut handle) = process {
            if let Err(e) = handle.terminate() {
                warn!(session = self.id.short(), "failed to terminate process: {e}");
            }
        }

        if writer_busy {
            self.close_writer(lock(&self.writer).take());
        }

        if was_running {
            info!(session = self.id.short(), "session stopped");
        }
    }

    fn close_writer(&self, writer: Option<Box<dyn Write + Send>>) {
        if let Some(mut writer) = writer {
            if let Err(e) = writer.flush() {
                debug!(session = self.id.short(), "flush on close failed: {e}");
            }
        }
    }
}

/// A shell process bridged to an observable, bounded output buffer.
///
/// All methods take `&self` and may be called from any thread while the
/// reader thread is running.
pub struct TerminalSession {
    command: ShellCommand,
    options: SessionOptions,
    shared: Arc<Shared>,
}

impl TerminalSession {
    /// Create a session for `command` with default options. Nothing is
    /// spawned until [`start`](Self::start).
    pub fn new(command: ShellCommand) -> Self {
        Self::with_options(command, SessionOptions::default())
    }

    pub fn with_options(command: ShellCommand, options: SessionOptions) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            command,
            options,
            shared: Arc::new(Shared {
                id: SessionId::new(),
                running: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                lifecycle: Mutex::new(()),
                writer: Mutex::new(None),
                process: Mutex::new(None),
                state,
            }),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.shared.id
    }

    pub fn command(&self) -> &ShellCommand {
        &self.command
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Spawn the process and its reader thread.
    ///
    /// Already running: logs a warning and does nothing. Spawn failure:
    /// logs an error and leaves the session stopped. Check
    /// [`is_running`](Self::is_running) to learn the outcome.
    ///
    /// A stopped session may be started again; the new run begins with
    /// empty output.
    pub fn start(&self) {
        if let Err(e) = self.try_start() {
            match e {
                SessionError::AlreadyRunning => {
                    warn!(session = self.shared.id.short(), "start ignored: already running");
                }
                e => error!(
                    session = self.shared.id.short(),
                    command = %self.command,
                    "failed to start session: {e}"
                ),
            }
        }
    }

    fn try_start(&self) -> Result<(), SessionError> {
        let shared = &self.shared;
        let _guard = lock(&shared.lifecycle);

        if shared.running.load(Ordering::Acquire) {
            return Err(SessionError::AlreadyRunning);
        }

        let generation = shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(session = shared.id.short(), command = %self.command, generation, "starting session");

        let SpawnedProcess {
            reader,
            writer,
            handle,
        } = match process::spawn(&self.command, self.options.backend) {
            Ok(spawned) => spawned,
            Err(e) => {
                shared.state.send_replace(SessionState::Stopped(SessionOutput::empty()));
                return Err(e);
            }
        };

        let pid = handle.pid();
        *lock(&shared.writer) = Some(writer);
        *lock(&shared.process) = Some(handle);
        shared.running.store(true, Ordering::Release);
        shared
            .state
            .send_replace(SessionState::Running(SessionOutput::empty()));

        let thread_shared = Arc::clone(shared);
        let chunk = self.options.read_chunk_size;
        let max_chars = self.options.max_output_chars;
        let spawned = thread::Builder::new()
            .name("vt-session-reader".to_string())
            .spawn(move || reader::run(thread_shared, generation, reader, chunk, max_chars));

        if let Err(e) = spawned {
            shared.cleanup_locked(generation);
            return Err(SessionError::ThreadSpawn(e.to_string()));
        }

        info!(session = shared.id.short(), pid = ?pid, "session running");
        Ok(())
    }

    /// Stop the session. Idempotent; the same cleanup runs when the process
    /// exits on its own.
    pub fn stop(&self) {
        let _guard = lock(&self.shared.lifecycle);
        let generation = self.shared.generation.load(Ordering::Acquire);
        self.shared.cleanup_locked(generation);
    }

    /// Write raw text to the process input and flush. No newline is added.
    ///
    /// Failures are logged and otherwise ignored; a failed write does not
    /// stop the session.
    pub fn write_input(&self, text: &str) {
        if let Err(e) = self.try_write(text.as_bytes()) {
            error!(session = self.shared.id.short(), "input dropped: {e}");
        }
    }

    /// `write_input(line + "\n")`.
    pub fn write_line(&self, line: &str) {
        let mut text = String::with_capacity(line.len() + 1);
        text.push_str(line);
        text.push('\n');
        self.write_input(&text);
    }

    /// Write bytes to the process input, reporting why a write was dropped.
    pub fn try_write(&self, data: &[u8]) -> Result<(), SessionError> {
        if !self.shared.running.load(Ordering::Acquire) {
            return Err(SessionError::NotRunning);
        }

        let mut slot = lock(&self.shared.writer);
        // Re-check under the lock: cleanup clears the flag and publishes the
        // stop before it takes the writer.
        if !self.shared.running.load(Ordering::Acquire) {
            return Err(SessionError::NotRunning);
        }
        let writer = slot.as_mut().ok_or(SessionError::NotRunning)?;
        writer.write_all(data)?;
        writer.flush()?;
        debug!(session = self.shared.id.short(), bytes = data.len(), "wrote input");
        Ok(())
    }

    /// Resize the terminal. Only meaningful for the PTY backend.
    pub fn resize(&self, cols: u16, rows: u16) -> Result<(), SessionError> {
        let mut slot = lock(&self.shared.process);
        let handle = slot.as_mut().ok_or(SessionError::NotRunning)?;
        handle.resize(cols, rows)
    }

    /// OS process id of the running child.
    pub fn pid(&self) -> Option<u32> {
        lock(&self.shared.process).as_ref().and_then(|h| h.pid())
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().is_running()
    }

    /// Current output text (empty before the first start).
    pub fn output(&self) -> Arc<str> {
        match self.shared.state.borrow().snapshot() {
            Some(out) => out.shared_text(),
            None => Arc::from(""),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Kill the child so its reader thread sees EOF and exits.
        self.stop();
    }
}

impl std::fmt::Debug for TerminalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSession")
            .field("id", &self.shared.id)
            .field("command", &self.command)
            .field("running", &self.is_running())
            .finish()
    }
}
