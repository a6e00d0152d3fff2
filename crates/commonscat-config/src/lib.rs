use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const USERNAME_VAR: &str = "BOT_USERNAME";
pub const PASSWORD_VAR: &str = "BOT_PASSWORD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing credentials.")]
    MissingCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `api.php` of the wiki being edited.
    pub api_url: String,
    pub wikidata_api_url: String,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// May reference the environment, e.g. `"$BOT_PASSWORD"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub articles_per_run: usize,
    pub edit_delay_secs: u64,
    pub error_delay_secs: u64,
    pub random_attempts: usize,
    pub edit_summary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://simple.wikipedia.org/w/api.php".to_string(),
            wikidata_api_url: "https://www.wikidata.org/w/api.php".to_string(),
            user_agent: "AsteraBot/1.0 (https://simple.wikipedia.org/wiki/User:AsteraBot)"
                .to_string(),
            username: None,
            password: None,
            articles_per_run: 15,
            edit_delay_secs: 3,
            error_delay_secs: 2,
            random_attempts: 5,
            edit_summary: "Bot: Adding Commons category using P373 from Wikidata".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// The config at `config_path`, or the defaults when there is no file.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/commonscat-bot");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn edit_delay(&self) -> Duration {
        Duration::from_secs(self.edit_delay_secs)
    }

    pub fn error_delay(&self) -> Duration {
        Duration::from_secs(self.error_delay_secs)
    }

    /// Login credentials from the config file, falling back to
    /// `BOT_USERNAME` / `BOT_PASSWORD` for whichever half is unset.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    fn credentials_with<F>(&self, env: F) -> Result<Credentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |configured: &Option<String>, var: &str| {
            configured
                .as_deref()
                .and_then(expand_value)
                .or_else(|| env(var))
                .filter(|value| !value.is_empty())
        };

        match (
            pick(&self.username, USERNAME_VAR),
            pick(&self.password, PASSWORD_VAR),
        ) {
            (Some(username), Some(password)) => Ok(Credentials { username, password }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }
}

/// Expands `~` and `$VARS`. A reference to an unset variable expands to
/// nothing rather than to the literal text.
fn expand_value(value: &str) -> Option<String> {
    shellexpand::full(value)
        .ok()
        .map(|expanded| expanded.into_owned())
        .filter(|expanded| !expanded.is_empty())
}
