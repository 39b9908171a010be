//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Transport
    pub const HTTP_PROXY: &str = "HTTP_PROXY";
    pub const REQUESTR_ACCEPT_INVALID_CERTS: &str = "REQUESTR_ACCEPT_INVALID_CERTS";
    pub const REQUESTR_TIMEOUT_SECS: &str = "REQUESTR_TIMEOUT_SECS";

    // Configuration
    pub const REQUESTR_CONFIG: &str = "REQUESTR_CONFIG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` then `.env.local` from the working directory.
    ///
    /// Missing files are ignored; variables already set win.
    pub fn init() -> Result<Self, EnvError> {
        for file in [".env", ".env.local"] {
            match dotenvy::from_filename(file) {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Option<bool> {
        env::var(var)
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
    }

    /// Get an integer variable.
    pub fn get_int<T: std::str::FromStr>(var: &str) -> Result<Option<T>, EnvError> {
        match env::var(var) {
            Ok(v) => v.parse().map(Some).map_err(|_| EnvError::InvalidValue {
                var: var.to_string(),
                message: "expected integer".to_string(),
            }),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_var() {
        assert_eq!(Environment::get("NONEXISTENT_REQUESTR_VAR_12345"), None);
    }

    #[test]
    fn test_bool_parsing() {
        env::set_var("REQUESTR_TEST_BOOL", "true");
        assert_eq!(Environment::get_bool("REQUESTR_TEST_BOOL"), Some(true));
        env::set_var("REQUESTR_TEST_BOOL", "1");
        assert_eq!(Environment::get_bool("REQUESTR_TEST_BOOL"), Some(true));
        env::set_var("REQUESTR_TEST_BOOL", "off");
        assert_eq!(Environment::get_bool("REQUESTR_TEST_BOOL"), Some(false));
        env::remove_var("REQUESTR_TEST_BOOL");
        assert_eq!(Environment::get_bool("REQUESTR_TEST_BOOL"), None);
    }

    #[test]
    fn test_integer_parsing() {
        env::set_var("REQUESTR_TEST_INT", "42");
        let val: Result<Option<u64>, _> = Environment::get_int("REQUESTR_TEST_INT");
        assert_eq!(val.unwrap(), Some(42));

        env::set_var("REQUESTR_TEST_INT", "forty-two");
        let val: Result<Option<u64>, _> = Environment::get_int("REQUESTR_TEST_INT");
        assert!(val.is_err());

        env::remove_var("REQUESTR_TEST_INT");
        let val: Result<Option<u64>, _> = Environment::get_int("REQUESTR_TEST_INT");
        assert_eq!(val.unwrap(), None);
    }

    #[test]
    fn test_environment_init_without_files() {
        assert!(Environment::init().is_ok());
    }
}
