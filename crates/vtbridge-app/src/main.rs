mod app;
mod boot;
mod cli;
mod command;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use vtbridge_config::schema::LogLevel;
use vtbridge_config::BridgeConfig;
use vtbridge_input::{InputBridge, InputProcessor};
use vtbridge_terminal::TerminalSession;

fn init_logging(cli_level: Option<&str>, config_level: LogLevel) {
    let directive = boot::log_directive(cli_level, config_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries session output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Load config before logging so its level can seed the filter.
    let loaded = match args.config.as_deref() {
        Some(path) => vtbridge_config::load_config_from(Path::new(path)),
        None => vtbridge_config::load_config(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    };

    init_logging(args.log_level.as_deref(), config.logging.level);

    tracing::info!("vtbridge v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if args.print_config {
        println!("{}", vtbridge_config::config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let bridge = Arc::new(InputBridge::new(boot::encoder_options(&config.input)));
    if !bridge.create_encoder() {
        tracing::error!("Key encoding unavailable; :key commands will be ignored");
    }
    tracing::info!(version = bridge.version(), "Input bridge ready");

    let mut processor = InputProcessor::new(Arc::clone(&bridge));
    processor.set_bracketed_paste(config.input.bracketed_paste);
    processor.set_reject_unsafe_paste(config.input.reject_unsafe_paste);

    let session = TerminalSession::with_options(
        boot::shell_command(&config.shell, &args),
        boot::session_options(&config, args.pty),
    );
    session.start();

    app::run(session, processor).await;

    bridge.destroy_encoder();
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
