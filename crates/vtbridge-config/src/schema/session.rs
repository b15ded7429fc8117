//! Session buffering configuration.

use serde::{Deserialize, Serialize};

/// Default number of output characters a session retains.
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 100_000;

/// Default size of a single read from the process output stream.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8_192;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Output characters retained before trimming from the front
    /// (valid range: 1024-10_000_000).
    pub max_output_chars: usize,
    /// Bytes requested per read (valid range: 256-1_048_576).
    pub read_chunk_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_output_chars, 100_000);
        assert_eq!(config.read_chunk_size, 8_192);
    }

    #[test]
    fn session_config_partial_toml() {
        let config: SessionConfig = toml::from_str("max_output_chars = 5000").unwrap();
        assert_eq!(config.max_output_chars, 5000);
        assert_eq!(config.read_chunk_size, DEFAULT_READ_CHUNK_SIZE);
    }
}
