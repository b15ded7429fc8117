use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures inside a terminal session.
///
/// These never cross the session boundary: the session logs them and
/// degrades to the stopped state instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to spawn '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("session is already running")]
    AlreadyRunning,

    #[error("session is not running")]
    NotRunning,

    #[error("failed to start reader thread: {0}")]
    ThreadSpawn(String),

    #[error("failed to resize terminal: {0}")]
    ResizeFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EncoderError {
    #[error("failed to create key encoder: {0}")]
    CreateFailed(String),

    #[error("key encoder is not initialized")]
    NotInitialized,

    #[error("unknown key code: {0}")]
    UnknownKey(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("session.read_chunk_size = 1".into());
        assert_eq!(
            err.to_string(),
            "config validation error: session.read_chunk_size = 1"
        );
    }

    #[test]
    fn session_error_display() {
        let err = SessionError::SpawnFailed {
            program: "/nope".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to spawn '/nope': No such file or directory"
        );

        assert_eq!(
            SessionError::AlreadyRunning.to_string(),
            "session is already running"
        );
        assert_eq!(SessionError::NotRunning.to_string(), "session is not running");
    }

    #[test]
    fn encoder_error_display() {
        assert_eq!(
            EncoderError::NotInitialized.to_string(),
            "key encoder is not initialized"
        );
        assert_eq!(
            EncoderError::UnknownKey(4242).to_string(),
            "unknown key code: 4242"
        );
    }

    #[test]
    fn session_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
