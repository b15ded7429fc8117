//! Pipe backend: `std::process` with stdout and stderr sharing one pipe.

use std::process::{Child, Command, Stdio};

use vtbridge_common::SessionError;

use super::types::{ProcessHandle, SpawnedProcess};
use super::spawn_failed;
use crate::shell::ShellCommand;

pub(super) fn spawn_pipe(command: &ShellCommand) -> Result<SpawnedProcess, SessionError> {
    let (reader, out_writer) = std::io::pipe().map_err(|e| spawn_failed(command, e))?;
    let err_writer = out_writer
        .try_clone()
        .map_err(|e| spawn_failed(command, e))?;

    let mut cmd = Command::new(command.program());
    cmd.args(command.get_args())
        .envs(command.get_env())
        .stdin(Stdio::piped())
        .stdout(out_writer)
        .stderr(err_writer);
    if let Some(dir) = command.get_cwd() {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| spawn_failed(command, e))?;
    // `cmd` still owns the parent's copies of the pipe's write end; the
    // reader only sees EOF once they are closed.
    drop(cmd);

    let Some(stdin) = child.stdin.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(spawn_failed(command, "child stdin was not captured"));
    };

    tracing::debug!(pid = child.id(), program = %command, "spawned piped process");

    Ok(SpawnedProcess {
        reader: Box::new(reader),
        writer: Box::new(stdin),
        handle: Box::new(PipeChild { child }),
    })
}

struct PipeChild {
    child: Child,
}

impl ProcessHandle for PipeChild {
    fn pid(&self) -> Option<u32> {
        Some(self.child.id())
    }

    fn terminate(&mut self) -> std::io::Result<()> {
        if let Some(status) = self.child.try_wait()? {
            tracing::debug!(pid = self.child.id(), %status, "process already exited");
            return Ok(());
        }
        self.child.kill()?;
        let status = self.child.wait()?;
        tracing::debug!(pid = self.child.id(), %status, "process terminated");
        Ok(())
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<(), SessionError> {
        tracing::debug!(cols, rows, "resize ignored by pipe backend");
        Ok(())
    }
}
