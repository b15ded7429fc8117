//! Configuration schema types for vtbridge.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod input;
mod logging;
mod session;
mod shell;

pub use input::*;
pub use logging::*;
pub use session::*;
pub use shell::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub shell: ShellConfig,
    pub session: SessionConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}
