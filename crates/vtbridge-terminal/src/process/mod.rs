//! Process spawning.
//!
//! Two backends produce the same [`SpawnedProcess`] shape: plain pipes with
//! stderr merged into stdout, and a pseudo-terminal via `portable-pty`.

mod pipe;
mod pty;
mod types;

pub use types::*;

use vtbridge_common::SessionError;

use crate::shell::ShellCommand;

/// Spawn `command` with the given backend.
pub fn spawn(command: &ShellCommand, backend: Backend) -> Result<SpawnedProcess, SessionError> {
    match backend {
        Backend::Pipe => pipe::spawn_pipe(command),
        Backend::Pty { cols, rows } => pty::spawn_pty(command, cols, rows),
    }
}

pub(crate) fn spawn_failed(command: &ShellCommand, reason: impl ToString) -> SessionError {
    SessionError::SpawnFailed {
        program: command.program().to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_to_end(mut process: SpawnedProcess) -> String {
        let mut out = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            match process.reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => out.extend_from_slice(&buf[..n]),
            }
        }
        let _ = process.handle.terminate();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn pipe_backend_merges_stderr_into_stdout() {
        let cmd = ShellCommand::new("/bin/sh")
            .arg("-c")
            .arg("echo out; echo err 1>&2");
        let process = spawn(&cmd, Backend::Pipe).expect("spawn sh");
        let output = read_to_end(process);
        assert!(output.contains("out\n"), "got: {output:?}");
        assert!(output.contains("err\n"), "got: {output:?}");
    }

    #[test]
    fn pipe_backend_passes_env_and_cwd() {
        let cmd = ShellCommand::new("/bin/sh")
            .arg("-c")
            .arg("echo $VTBRIDGE_TEST_VAR; pwd")
            .env("VTBRIDGE_TEST_VAR", "marker-42")
            .cwd("/");
        let process = spawn(&cmd, Backend::Pipe).expect("spawn sh");
        let output = read_to_end(process);
        assert_eq!(output, "marker-42\n/\n");
    }

    #[test]
    fn missing_program_is_spawn_failure() {
        let cmd = ShellCommand::new("/definitely/not/a/shell");
        let result = spawn(&cmd, Backend::Pipe);
        assert!(matches!(result, Err(SessionError::SpawnFailed { .. })));
    }

    #[test]
    fn pty_backend_spawns_and_reads() {
        let cmd = ShellCommand::new("/bin/echo").arg("pty-hello");
        let process = spawn(&cmd, Backend::Pty { cols: 80, rows: 24 }).expect("spawn pty");
        assert!(process.handle.pid().is_some());
        let output = read_to_end(process);
        assert!(output.contains("pty-hello"), "got: {output:?}");
    }

    #[test]
    fn terminate_kills_long_running_child() {
        let cmd = ShellCommand::new("/bin/sleep").arg("30");
        let mut process = spawn(&cmd, Backend::Pipe).expect("spawn sleep");
        process.handle.terminate().expect("terminate");
        // Terminating an already reaped process is harmless.
        process.handle.terminate().expect("second terminate");
    }
}
