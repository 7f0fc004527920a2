//! Settings loaded from the environment and an optional `.env` file
//!
//! | Variable             | Required | Default                     |
//! |----------------------|----------|-----------------------------|
//! | `ANTHROPIC_API_KEY`  | yes      |                             |
//! | `MODEL`              | yes      |                             |
//! | `DEBUG`              | no       | `false`                     |
//! | `ANTHROPIC_BASE_URL` | no       | `https://api.anthropic.com` |
//! | `MAX_TOKENS`         | no       | `1024`                      |

use thiserror::Error;

use crate::agent::AgentConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings for the chat
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub debug: bool,
    pub base_url: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("debug", &self.debug)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Settings {
    /// Load from the process environment, after reading `.env` if present.
    ///
    /// Variables already set in the environment win over `.env` entries.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let debug = match lookup("DEBUG") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { key: "DEBUG", value })?,
            None => false,
        };

        let max_tokens = match lookup("MAX_TOKENS") {
            Some(value) => {
                let parsed = value.trim().parse::<u32>();
                match parsed {
                    Ok(n) if n > 0 => n,
                    _ => return Err(ConfigError::Invalid { key: "MAX_TOKENS", value }),
                }
            }
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            api_key: required("ANTHROPIC_API_KEY")?,
            model: required("MODEL")?,
            debug,
            base_url: lookup("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_tokens,
        })
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            debug: self.debug,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" | "t" => Some(true),
        "0" | "false" | "no" | "off" | "n" | "f" | "" => Some(false),
        _ => None,
    }
}
