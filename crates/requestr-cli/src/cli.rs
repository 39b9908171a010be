//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use requestr_common_config::{vars, ClientSettings, ConfigLoader, Environment, RequestrConfig};
use requestr_common_http::{HttpClient, HttpConfig};

use crate::commands::{DeleteCommand, GetCommand, PostCommand};
use crate::error::CliError;

/// requestr - send GET, POST and DELETE requests and print the normalized response
#[derive(Debug, Parser)]
#[command(
    name = "requestr",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::REQUESTR_CONFIG,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Log request payloads, response bodies and headers
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a GET request
    Get(GetCommand),

    /// Send a POST request
    Post(PostCommand),

    /// Send a DELETE request
    Delete(DeleteCommand),
}

impl Cli {
    /// Load `.env` files and the config file, then apply env overrides.
    ///
    /// An explicit `--config` path must exist; otherwise `requestr.yaml` in
    /// the working directory is used when present.
    pub fn load_config(&self) -> Result<RequestrConfig, CliError> {
        Environment::init()?;

        let loader = ConfigLoader::default();
        let mut config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: RequestrConfig) -> Result<(), CliError> {
        let client = HttpClient::with_config(http_config(&config.client))?;
        let ctx = CommandContext {
            client,
            format: self.format,
            debug: self.debug,
        };

        match self.command {
            Command::Get(cmd) => cmd.execute(&ctx).await,
            Command::Post(cmd) => cmd.execute(&ctx).await,
            Command::Delete(cmd) => cmd.execute(&ctx).await,
        }
    }
}

/// Translate file/env client settings into the HTTP client config.
pub fn http_config(settings: &ClientSettings) -> HttpConfig {
    let mut config = HttpConfig {
        proxy: settings.proxy.clone(),
        accept_invalid_certs: settings.accept_invalid_certs,
        cookie_store: settings.cookie_store,
        gzip: settings.gzip,
        connect_timeout: settings.connect_timeout_secs.map(Duration::from_secs),
        request_timeout: settings.request_timeout_secs.map(Duration::from_secs),
        ..HttpConfig::default()
    };

    if let Some(user_agent) = &settings.user_agent {
        config.user_agent = user_agent.clone();
    }

    config
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub client: HttpClient,
    pub format: OutputFormat,
    pub debug: bool,
}
