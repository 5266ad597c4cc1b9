//! Configuration management for the Linear CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use lnr::{ApiKey, LinearClient};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

/// CLI configuration, stored as TOML.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Personal API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Team key used when a command needs a team and none was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_team: Option<String>,
    /// Default output format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
}

/// Settable configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    #[value(name = "api_key")]
    ApiKey,
    #[value(name = "default_team")]
    DefaultTeam,
    #[value(name = "output_format")]
    OutputFormat,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigKey::ApiKey => "api_key",
            ConfigKey::DefaultTeam => "default_team",
            ConfigKey::OutputFormat => "output_format",
        };
        f.write_str(name)
    }
}

impl Config {
    /// Get a value as it would be displayed.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::ApiKey => self.api_key.clone(),
            ConfigKey::DefaultTeam => self.default_team.clone(),
            ConfigKey::OutputFormat => self.output_format.map(|f| f.to_string()),
        }
    }

    /// Set a value, validating the output format.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::ApiKey => self.api_key = Some(value.trim().to_owned()),
            ConfigKey::DefaultTeam => self.default_team = Some(value.to_owned()),
            ConfigKey::OutputFormat => {
                let format = OutputFormat::from_str(value, true).map_err(|_| {
                    CliError::new(t!("invalid_output_format", value = value))
                        .with_hint(t!("hint_output_formats"))
                })?;
                self.output_format = Some(format);
            }
        }
        Ok(())
    }
}

/// An API key and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub key: String,
    pub from_env: bool,
}

impl ResolvedKey {
    /// Masked form for display.
    pub fn masked(&self) -> String {
        ApiKey::new(&self.key).masked()
    }
}

/// Pick the API key: a non-empty environment value wins over the stored one.
pub fn resolve_api_key(env_value: Option<String>, config: &Config) -> Option<ResolvedKey> {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(key) => Some(ResolvedKey {
            key,
            from_env: true,
        }),
        None => config.api_key.clone().map(|key| ResolvedKey {
            key,
            from_env: false,
        }),
    }
}

/// Get the configuration directory, `~/.lnr`.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".lnr"))
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from the default location.
pub fn load_config() -> Result<Config> {
    load_from(&config_path()?)
}

/// Load configuration from `path`.
///
/// A missing or unparseable file yields defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).context("Failed to read config file")?;

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!("ignoring invalid config file {}: {}", path.display(), e);
            Ok(Config::default())
        }
    }
}

/// Save configuration to the default location.
pub fn save_config(config: &Config) -> Result<()> {
    save_to(config, &config_path()?)
}

/// Save configuration to `path`, creating its directory.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, content).context("Failed to write config file")?;

    Ok(())
}

/// Build a Linear client from the environment or stored configuration.
pub fn build_client(config: &Config) -> Result<LinearClient> {
    let key = resolve_api_key(env::var(API_KEY_ENV).ok(), config).ok_or(lnr::Error::AuthRequired)?;
    tracing::debug!(from_env = key.from_env, "using api key {}", key.masked());
    build_client_with_key(&key.key)
}

/// Build a Linear client for an explicit key.
pub fn build_client_with_key(key: &str) -> Result<LinearClient> {
    Ok(LinearClient::builder().api_key(key).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"lin_api_x\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config, Config::default());

        let mut config = config;
        config.set(ConfigKey::DefaultTeam, "ENG").unwrap();
        save_to(&config, &path).unwrap();
        assert_eq!(load_from(&path).unwrap().default_team.as_deref(), Some("ENG"));
    }

    #[test]
    fn test_round_trip_creates_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".lnr").join("config.toml");

        let mut config = Config::default();
        config.set(ConfigKey::DefaultTeam, "ENG").unwrap();
        config.set(ConfigKey::OutputFormat, "JSON").unwrap();
        save_to(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.output_format, Some(OutputFormat::Json));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("output_format = \"json\""));
        assert!(!raw.contains("api_key"));
    }

    #[test]
    fn test_invalid_output_format() {
        let mut config = Config::default();
        let err = config.set(ConfigKey::OutputFormat, "yaml").unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert_eq!(cli.message, "invalid output_format: yaml");
        assert_eq!(cli.hint.as_deref(), Some("valid values: table, json, quiet"));
        assert_eq!(config.output_format, None);
    }

    #[test]
    fn test_env_key_wins() {
        let config = Config {
            api_key: Some("lin_api_stored_key".into()),
            ..Default::default()
        };

        let key = resolve_api_key(Some("lin_api_from_env".into()), &config).unwrap();
        assert!(key.from_env);
        assert_eq!(key.key, "lin_api_from_env");

        let key = resolve_api_key(Some("  ".into()), &config).unwrap();
        assert!(!key.from_env);
        assert_eq!(key.masked(), "lin_api_st...");

        assert_eq!(resolve_api_key(None, &Config::default()), None);
    }

    #[test]
    fn test_get_values() {
        let config = Config {
            default_team: Some("ENG".into()),
            output_format: Some(OutputFormat::Quiet),
            ..Default::default()
        };
        assert_eq!(config.get(ConfigKey::DefaultTeam).as_deref(), Some("ENG"));
        assert_eq!(config.get(ConfigKey::OutputFormat).as_deref(), Some("quiet"));
        assert_eq!(config.get(ConfigKey::ApiKey), None);
    }
}
