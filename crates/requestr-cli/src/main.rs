//! requestr CLI
//!
//! Main entry point for the `requestr` binary.

use std::process::ExitCode;

use clap::Parser;
use requestr_common_config::{LogSettings, RequestrConfig};
use requestr_common_log::{LogConfig, LogFormat, LogLevel};
use tracing::error;

mod cli;
mod commands;
mod error;
mod output;

use cli::Cli;
use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&cli, &LogSettings::default());
            return report(&e);
        }
    };

    init_logging(&cli, &config.log);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &CliError) -> ExitCode {
    match e.field() {
        Some(field) => error!(argument = field, "{e}"),
        None => error!("{e}"),
    }
    e.exit_code()
}

fn run(cli: Cli, config: RequestrConfig) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(cli.execute(config))
}

/// File settings first, then `REQUESTR_LOG_*` variables, then `-v`/`-q`.
fn init_logging(cli: &Cli, settings: &LogSettings) {
    let mut config = LogConfig {
        level: LogLevel::Warn,
        ..LogConfig::default()
    };

    if let Some(level) = settings.level.as_deref().and_then(LogLevel::parse) {
        config.level = level;
    }
    if let Some(format) = &settings.format {
        config.format = LogFormat::parse(format);
    }
    config.file_path = settings.file.clone();

    let mut config = config.with_env();

    if let Some(level) = LogLevel::from_verbosity(cli.verbose, cli.quiet) {
        config.level = level;
    }

    // Debug output is logged at info.
    if cli.debug && !cli.quiet && matches!(config.level, LogLevel::Warn | LogLevel::Error) {
        config.level = LogLevel::Info;
    }

    if let Err(e) = requestr_common_log::init(config) {
        eprintln!("requestr: {e}");
    }
}
