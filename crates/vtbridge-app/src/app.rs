//! The console loop: session output to stdout, stdin lines to the session.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};
use vtbridge_input::{InputProcessor, InputResult, KeyEvent};
use vtbridge_terminal::{SessionState, TerminalSession};

use crate::command::{self, Command};

/// How long a session may keep running after stdin closes.
const EOF_GRACE: Duration = Duration::from_secs(2);

/// Tracks how much output has been printed so only new text is written.
#[derive(Debug, Default)]
pub struct OutputTracker {
    seen: u64,
}

impl OutputTracker {
    /// Text in `state` not yet returned by a previous call.
    pub fn delta<'a>(&mut self, state: &'a SessionState) -> &'a str {
        let Some(output) = state.snapshot() else {
            return "";
        };
        // A restarted session counts from zero again.
        if output.total_chars() < self.seen {
            self.seen = 0;
        }
        let fresh = output.since(self.seen);
        self.seen = output.total_chars();
        fresh
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run until `:quit`, Ctrl-C, or stdin closing. Consumes the session so
/// the output printer can finish once it is dropped.
pub async fn run(session: TerminalSession, processor: InputProcessor) {
    let printer = tokio::spawn(print_output(session.subscribe()));
    let mut lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(Ok(line)) => match command::parse(&line) {
                    Ok(cmd) => {
                        if dispatch(&session, &processor, cmd) == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => eprintln!("vtbridge: {e}"),
                },
                None => {
                    debug!("stdin closed");
                    wait_for_exit(session.subscribe(), EOF_GRACE).await;
                    break;
                }
                Some(Err(e)) => {
                    error!("failed to read stdin: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    session.stop();
    drop(session);
    if let Err(e) = printer.await {
        warn!("output printer failed: {e}");
    }
}

/// Forward lines from `input` on a plain thread.
///
/// Tokio's own stdin reads on the blocking pool, and a read still pending
/// there keeps the runtime from shutting down. A detached thread does not.
fn spawn_line_reader<R>(input: R) -> mpsc::UnboundedReceiver<std::io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = thread::Builder::new()
        .name("vt-stdin".to_string())
        .spawn(move || {
            for line in input.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        // The sender is gone, so the loop treats this like stdin closing.
        error!("failed to spawn stdin reader: {e}");
    }
    rx
}

fn dispatch(session: &TerminalSession, processor: &InputProcessor, cmd: Command) -> Flow {
    match cmd {
        Command::Line(line) => session.write_line(&line),
        Command::Key { key, mods } => {
            let event = KeyEvent::press(key).with_mods(mods);
            match processor.process_key(&event) {
                InputResult::TerminalInput(seq) => session.write_input(&seq),
                InputResult::Rejected(verdict) => warn!(%verdict, "key input rejected"),
                InputResult::Consumed => debug!(%key, "key produced no input"),
            }
        }
        Command::Paste(text) => match processor.process_paste(&text) {
            InputResult::TerminalInput(seq) => session.write_input(&seq),
            InputResult::Rejected(verdict) => eprintln!("vtbridge: paste rejected: {verdict}"),
            InputResult::Consumed => {}
        },
        Command::Start => session.start(),
        Command::Stop => session.stop(),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

async fn print_output(mut rx: watch::Receiver<SessionState>) {
    let mut tracker = OutputTracker::default();
    let mut was_running = false;

    loop {
        let (fresh, running) = {
            let state = rx.borrow_and_update();
            (tracker.delta(&state).to_string(), state.is_running())
        };

        if !fresh.is_empty() {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(fresh.as_bytes()).and_then(|()| stdout.flush()) {
                error!("failed to write output: {e}");
                return;
            }
        }
        if was_running && !running {
            info!("session ended");
        }
        was_running = running;

        if rx.changed().await.is_err() {
            break;
        }
    }
}

async fn wait_for_exit(mut rx: watch::Receiver<SessionState>, grace: Duration) {
    let exited = tokio::time::timeout(grace, rx.wait_for(|state| !state.is_running())).await;
    if exited.is_err() {
        debug!("session still running after stdin closed; stopping it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtbridge_terminal::{OutputBuffer, SessionOutput};

    fn running(chunks: &[&str], cap: usize) -> SessionState {
        let mut buf = OutputBuffer::new(cap);
        for chunk in chunks {
            buf.push_str(chunk);
        }
        SessionState::Running(SessionOutput::from_buffer(&buf))
    }

    #[test]
    fn tracker_returns_only_new_text() {
        let mut tracker = OutputTracker::default();
        assert_eq!(tracker.delta(&SessionState::Idle), "");
        assert_eq!(tracker.delta(&running(&["hello "], 100)), "hello ");
        assert_eq!(tracker.delta(&running(&["hello ", "world"], 100)), "world");
        assert_eq!(tracker.delta(&running(&["hello ", "world"], 100)), "");
    }

    #[tokio::test]
    async fn line_reader_forwards_lines_then_closes() {
        let mut rx = spawn_line_reader(std::io::Cursor::new("ls\n:quit\n"));
        assert_eq!(rx.recv().await.map(Result::ok), Some(Some("ls".to_string())));
        assert_eq!(rx.recv().await.map(Result::ok), Some(Some(":quit".to_string())));
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn tracker_resets_on_restart() {
        let mut tracker = OutputTracker::default();
        tracker.delta(&running(&["first run\n"], 100));
        assert_eq!(tracker.delta(&running(&["new\n"], 100)), "new\n");
    }
}
