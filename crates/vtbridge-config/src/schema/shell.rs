//! Shell process configuration types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the shell's standard streams are connected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Plain pipes, stderr merged into stdout.
    #[default]
    Pipe,
    /// A pseudo-terminal sized `cols` x `rows`.
    Pty,
}

/// Shell process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell program path. Empty string means auto-detect from `$SHELL`.
    pub program: String,
    /// Extra arguments passed to the shell.
    pub args: Vec<String>,
    /// Initial working directory. `None` means inherit from parent.
    pub working_directory: Option<String>,
    /// Extra environment variables injected into the shell.
    pub env: HashMap<String, String>,
    pub backend: BackendKind,
    /// PTY columns (valid range: 2-1000). Ignored by the pipe backend.
    pub cols: u16,
    /// PTY rows (valid range: 1-500). Ignored by the pipe backend.
    pub rows: u16,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            working_directory: None,
            env: HashMap::new(),
            backend: BackendKind::Pipe,
            cols: 80,
            rows: 24,
        }
    }
}
