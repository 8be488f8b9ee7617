//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::DemoConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `blockchain.rpc_url`.
pub const PROVIDER_URL_ENV_VAR: &str = "ETH_PROVIDER_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<DemoConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DemoConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut DemoConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using an arbitrary variable lookup.
pub fn apply_overrides_from<F>(config: &mut DemoConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(PROVIDER_URL_ENV_VAR).filter(|u| !u.trim().is_empty()) {
        tracing::debug!(rpc_url = %url, "Provider URL taken from environment");
        config.blockchain.rpc_url = url;
    }
}

/// Values given on the command line. `None` (or `false`) leaves the config alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rpc_url: Option<String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
    pub value_wei: Option<String>,
    pub seed: Option<u64>,
}

/// Apply command-line overrides. These take precedence over the file and
/// the environment, so call this after `apply_env_overrides`.
pub fn apply_cli_overrides(config: &mut DemoConfig, cli: &CliOverrides) {
    if let Some(url) = &cli.rpc_url {
        config.blockchain.rpc_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if cli.json_logs {
        config.observability.json_logs = true;
    }
    if let Some(value) = &cli.value_wei {
        config.demo.value_wei = value.clone();
    }
    if cli.seed.is_some() {
        config.demo.seed = cli.seed;
    }
}
