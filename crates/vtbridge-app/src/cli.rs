use clap::Parser;

/// vtbridge: run a shell session and drive it with encoded key events.
#[derive(Parser, Debug)]
#[command(name = "vtbridge", version, about)]
pub struct Args {
    /// Execute a command instead of the configured shell.
    #[arg(short = 'e', long)]
    pub execute: Option<String>,

    /// Working directory to start in.
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run the shell on a pseudo-terminal instead of pipes.
    #[arg(long)]
    pub pty: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "vtbridge",
            "-e",
            "/bin/echo hi",
            "--log-level",
            "debug",
            "--pty",
        ])
        .unwrap();
        assert_eq!(args.execute.as_deref(), Some("/bin/echo hi"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.pty);
        assert!(!args.print_config);
    }

    #[test]
    fn defaults_are_empty() {
        let args = Args::try_parse_from(["vtbridge"]).unwrap();
        assert!(args.execute.is_none());
        assert!(args.config.is_none());
        assert!(!args.pty);
    }
}
