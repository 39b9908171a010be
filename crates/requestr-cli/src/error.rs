//! CLI error handling.

use std::io;
use std::process::ExitCode;

use requestr_common_config::{ConfigError, EnvError};
use requestr_common_http::HttpError;
use thiserror::Error;

/// CLI error type. Every variant ends the process with its own exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: HttpError,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl CliError {
    /// Numeric process status for this error
    pub fn code(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Network { .. } => 4,
            Self::Validation { .. } => 5,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Argument the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Create a validation error tied to an argument
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        let message = e.to_string();
        match e {
            HttpError::InvalidContentType(_) => Self::Validation {
                message,
                field: Some("content-type".to_string()),
            },
            HttpError::InvalidHeader { .. } => Self::Validation {
                message,
                field: Some("header".to_string()),
            },
            HttpError::FileOpen { source, .. } => Self::Io {
                message,
                source: Some(source),
            },
            HttpError::Request(ref source) if source.is_builder() => Self::Validation {
                message,
                field: Some("url".to_string()),
            },
            e @ (HttpError::ClientBuild(_) | HttpError::InvalidProxy { .. }) => Self::Config {
                message,
                source: Some(Box::new(e)),
            },
            other => Self::Network {
                message,
                source: other,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(e: EnvError) -> Self {
        Self::Config {
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
            source: Some(e),
        }
    }
}
