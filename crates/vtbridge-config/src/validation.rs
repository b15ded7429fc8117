//! Configuration validation.
//!
//! Checks numeric ranges and collects every problem into a single
//! `ConfigError::ValidationError`.

use crate::schema::BridgeConfig;
use vtbridge_common::ConfigError;

/// Push an error if `value` is outside `[min, max]`.
fn validate_range<T>(errors: &mut Vec<String>, name: &str, value: T, min: T, max: T)
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BridgeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "shell.cols", config.shell.cols, 2, 1000);
    validate_range(&mut errors, "shell.rows", config.shell.rows, 1, 500);
    validate_range(
        &mut errors,
        "session.max_output_chars",
        config.session.max_output_chars,
        1024,
        10_000_000,
    );
    validate_range(
        &mut errors,
        "session.read_chunk_size",
        config.session.read_chunk_size,
        256,
        1_048_576,
    );

    if let Some(dir) = &config.shell.working_directory {
        if dir.trim().is_empty() {
            errors.push("shell.working_directory must not be blank".into());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
