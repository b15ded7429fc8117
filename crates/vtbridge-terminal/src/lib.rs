pub mod buffer;
pub mod process;
pub mod session;
pub mod shell;

pub use buffer::{OutputBuffer, Utf8Decoder};
pub use process::Backend;
pub use session::{
    SessionOptions, SessionOutput, SessionState, TerminalSession, DEFAULT_MAX_OUTPUT_CHARS,
    DEFAULT_READ_CHUNK,
};
pub use shell::{detect_shell, ShellCommand};
