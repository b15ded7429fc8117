//! Startup: turn configuration and CLI overrides into session and encoder
//! settings.

use vtbridge_config::schema::{BackendKind, InputConfig, LogLevel, ShellConfig};
use vtbridge_config::BridgeConfig;
use vtbridge_input::EncoderOptions;
use vtbridge_terminal::{Backend, SessionOptions, ShellCommand};

use crate::cli::Args;

/// The command a session runs: `--execute` wins, then `[shell] program`,
/// then the detected login shell.
pub fn shell_command(shell: &ShellConfig, args: &Args) -> ShellCommand {
    let mut command = match args.execute.as_deref() {
        Some(line) => ShellCommand::parse(line),
        None if shell.program.trim().is_empty() => {
            ShellCommand::default_shell().args(shell.args.iter().cloned())
        }
        None => ShellCommand::new(shell.program.trim()).args(shell.args.iter().cloned()),
    };

    for (key, value) in &shell.env {
        command = command.env(key.clone(), value.clone());
    }

    if let Some(dir) = args
        .directory
        .as_deref()
        .or(shell.working_directory.as_deref())
    {
        command = command.cwd(dir);
    }

    command
}

pub fn session_options(config: &BridgeConfig, force_pty: bool) -> SessionOptions {
    let backend = match (config.shell.backend, force_pty) {
        (BackendKind::Pty, _) | (_, true) => Backend::Pty {
            cols: config.shell.cols,
            rows: config.shell.rows,
        },
        (BackendKind::Pipe, false) => Backend::Pipe,
    };

    SessionOptions {
        backend,
        max_output_chars: config.session.max_output_chars,
        read_chunk_size: config.session.read_chunk_size,
    }
}

pub fn encoder_options(input: &InputConfig) -> EncoderOptions {
    EncoderOptions {
        cursor_key_application: input.cursor_key_application,
        keypad_application: input.keypad_application,
        alt_sends_escape: input.alt_sends_escape,
        kitty_disambiguate: input.kitty_disambiguate,
    }
}

/// Filter directive for the subscriber when `RUST_LOG` is unset.
pub fn log_directive(cli_level: Option<&str>, config_level: LogLevel) -> String {
    cli_level
        .map(str::to_string)
        .unwrap_or_else(|| config_level.as_directive().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["vtbridge"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn execute_overrides_configured_program() {
        let shell = ShellConfig {
            program: "/bin/zsh".into(),
            ..ShellConfig::default()
        };
        let cmd = shell_command(&shell, &args(&["-e", "/bin/echo hi"]));
        assert_eq!(cmd.program(), "/bin/echo");
        assert_eq!(cmd.get_args(), ["hi"]);
    }

    #[test]
    fn configured_program_and_args() {
        let shell = ShellConfig {
            program: "/bin/bash".into(),
            args: vec!["--norc".into()],
            ..ShellConfig::default()
        };
        let cmd = shell_command(&shell, &args(&[]));
        assert_eq!(cmd.program(), "/bin/bash");
        assert_eq!(cmd.get_args(), ["--norc"]);
    }

    #[test]
    fn empty_program_detects_shell() {
        let cmd = shell_command(&ShellConfig::default(), &args(&[]));
        assert_eq!(cmd.program(), vtbridge_terminal::detect_shell());
    }

    #[test]
    fn env_and_directory_are_applied() {
        let mut shell = ShellConfig {
            working_directory: Some("/var".into()),
            ..ShellConfig::default()
        };
        shell.env.insert("FOO".into(), "bar".into());

        let cmd = shell_command(&shell, &args(&[]));
        assert_eq!(cmd.get_env().get("FOO").map(String::as_str), Some("bar"));
        assert_eq!(cmd.get_cwd().map(|p| p.to_str()), Some(Some("/var")));

        let cmd = shell_command(&shell, &args(&["-d", "/tmp"]));
        assert_eq!(cmd.get_cwd().map(|p| p.to_str()), Some(Some("/tmp")));
    }

    #[test]
    fn session_options_follow_config() {
        let mut config = BridgeConfig::default();
        config.session.max_output_chars = 5_000;
        let opts = session_options(&config, false);
        assert_eq!(opts.backend, Backend::Pipe);
        assert_eq!(opts.max_output_chars, 5_000);
        assert_eq!(opts.read_chunk_size, 8_192);

        config.shell.cols = 132;
        let opts = session_options(&config, true);
        assert_eq!(opts.backend, Backend::Pty { cols: 132, rows: 24 });
    }

    #[test]
    fn encoder_options_follow_config() {
        let input = InputConfig {
            kitty_disambiguate: true,
            alt_sends_escape: false,
            ..InputConfig::default()
        };
        let opts = encoder_options(&input);
        assert!(opts.kitty_disambiguate);
        assert!(!opts.alt_sends_escape);
        assert!(!opts.cursor_key_application);
    }

    #[test]
    fn log_directive_prefers_cli() {
        assert_eq!(log_directive(Some("debug"), LogLevel::Warn), "debug");
        assert_eq!(log_directive(None, LogLevel::Warn), "warn");
    }
}
