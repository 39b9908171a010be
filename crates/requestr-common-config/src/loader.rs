//! Configuration file loading and parsing.

use crate::types::RequestrConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "requestr.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
    })
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader that looks for `requestr.yaml` in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: dir.as_ref().to_path_buf(),
        }
    }

    /// Load `requestr.yaml` from the base directory, or defaults if absent.
    pub fn load(&self) -> Result<RequestrConfig, ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(RequestrConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load an explicitly named config file. A missing file is an error.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RequestrConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: RequestrConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_var_pattern().captures_iter(content) {
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(&cap[0], &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &RequestrConfig) -> Result<(), ConfigError> {
        let client = &config.client;

        if client.connect_timeout_secs == Some(0) || client.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "timeouts must be greater than 0 seconds".to_string(),
            });
        }

        if let Some(proxy) = &client.proxy {
            if !proxy.contains("://") {
                return Err(ConfigError::ValidationError {
                    message: format!("proxy must be an absolute URL, got {proxy}"),
                });
            }
        }

        if client.user_agent.as_deref() == Some("") {
            return Err(ConfigError::ValidationError {
                message: "user_agent must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config, RequestrConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        let config_content = r#"
client:
  proxy: http://proxy.local:3128
  accept_invalid_certs: false
  request_timeout_secs: 20
log:
  format: json
"#;
        fs::write(dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let config = ConfigLoader::new(dir.path()).load().unwrap();

        assert_eq!(config.client.proxy.as_deref(), Some("http://proxy.local:3128"));
        assert!(!config.client.accept_invalid_certs);
        assert_eq!(config.client.request_timeout_secs, Some(20));
        assert_eq!(config.log.format.as_deref(), Some("json"));
        assert!(config.client.cookie_store);
    }

    #[test]
    fn test_load_file_missing_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = ConfigLoader::new(dir.path()).load_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { path } if path == missing));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("REQUESTR_TEST_PROXY_HOST", "proxy.internal");
        let loader = ConfigLoader::new(".");
        let result = loader
            .expand_env_vars("proxy: http://${REQUESTR_TEST_PROXY_HOST}:${REQUESTR_TEST_PORT:-8080}")
            .unwrap();
        assert_eq!(result, "proxy: http://proxy.internal:8080");
        std::env::remove_var("REQUESTR_TEST_PROXY_HOST");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("user_agent: ${REQUESTR_MISSING_VAR}") {
            Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "REQUESTR_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new(".");

        let mut config = RequestrConfig::default();
        config.client.request_timeout_secs = Some(0);
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("timeouts")
        ));

        let mut config = RequestrConfig::default();
        config.client.proxy = Some("localhost:8080".to_string());
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("proxy")
        ));

        let mut config = RequestrConfig::default();
        config.client.user_agent = Some(String::new());
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        let bad_yaml = r#"
client:
  proxy: [unclosed
"#;
        fs::write(dir.path().join(CONFIG_FILE_NAME), bad_yaml).unwrap();

        match ConfigLoader::new(dir.path()).load() {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_http_proxy_env_overrides_file() {
        let original = std::env::var("HTTP_PROXY").ok();
        std::env::set_var("HTTP_PROXY", "http://env-proxy:9000");

        let mut config = RequestrConfig::default();
        config.client.proxy = Some("http://file-proxy:3128".to_string());
        config.apply_env().unwrap();
        assert_eq!(config.client.proxy.as_deref(), Some("http://env-proxy:9000"));

        match original {
            Some(val) => std::env::set_var("HTTP_PROXY", val),
            None => std::env::remove_var("HTTP_PROXY"),
        }
    }
}
