//! PTY backend using the `portable-pty` crate.

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};

use vtbridge_common::SessionError;

use super::types::{ProcessHandle, SpawnedProcess};
use super::spawn_failed;
use crate::shell::ShellCommand;

/// Build the `CommandBuilder` for `command`.
///
/// `TERM` defaults to `xterm-256color`; the command's own environment wins.
fn build_command(command: &ShellCommand) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(command.program());
    cmd.args(command.get_args());
    cmd.env("TERM", "xterm-256color");
    for (key, value) in command.get_env() {
        cmd.env(key, value);
    }
    match command.get_cwd() {
        Some(dir) => cmd.cwd(dir),
        None => {
            if let Ok(dir) = std::env::current_dir() {
                cmd.cwd(dir);
            }
        }
    }
    cmd
}

pub(super) fn spawn_pty(
    command: &ShellCommand,
    cols: u16,
    rows: u16,
) -> Result<SpawnedProcess, SessionError> {
    let size = PtySize {
        rows,
        cols,
        pixel_width: 0,
        pixel_height: 0,
    };

    let pair = native_pty_system()
        .openpty(size)
        .map_err(|e| spawn_failed(command, format!("failed to open PTY: {e}")))?;

    let child = pair
        .slave
        .spawn_command(build_command(command))
        .map_err(|e| spawn_failed(command, e))?;

    // Drop the slave side so the master sees EOF when the child exits.
    drop(pair.slave);

    let mut handle = PtyChild {
        child,
        master: pair.master,
    };

    let reader = match handle.master.try_clone_reader() {
        Ok(reader) => reader,
        Err(e) => {
            let _ = handle.terminate();
            return Err(spawn_failed(command, format!("failed to clone PTY reader: {e}")));
        }
    };
    let writer = match handle.master.take_writer() {
        Ok(writer) => writer,
        Err(e) => {
            let _ = handle.terminate();
            return Err(spawn_failed(command, format!("failed to take PTY writer: {e}")));
        }
    };

    tracing::debug!(pid = ?handle.pid(), program = %command, cols, rows, "spawned PTY process");

    Ok(SpawnedProcess {
        reader,
        writer,
        handle: Box::new(handle),
    })
}

struct PtyChild {
    child: Box<dyn Child + Send + Sync>,
    master: Box<dyn MasterPty + Send>,
}

impl ProcessHandle for PtyChild {
    fn pid(&self) -> Option<u32> {
        self.child.process_id()
    }

    fn terminate(&mut self) -> std::io::Result<()> {
        if let Some(status) = self.child.try_wait()? {
            tracing::debug!(code = status.exit_code(), "PTY process already exited");
            return Ok(());
        }
        self.child.kill()?;
        let status = self.child.wait()?;
        tracing::debug!(code = status.exit_code(), "PTY process terminated");
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SessionError> {
        let new_size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        self.master
            .resize(new_size)
            .map_err(|e| SessionError::ResizeFailed(e.to_string()))
    }
}
