//! Service configuration loaded from environment variables.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::llm::openai_chat::DEFAULT_BASE_URL;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
    },
    /// Provider base URL is not a valid URL.
    #[error("invalid provider url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience result alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Sampling settings for one kind of turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnConfig {
    /// Provider model identifier.
    pub model: String,
    /// Constrain output to a JSON object.
    pub json_object: bool,
}

/// Top-level service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Provider API key; `None` selects the mock provider.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Provider base URL.
    pub base_url: String,
    /// Listening port.
    pub port: u16,
    /// Settings for the first turn of a chat.
    pub new_chat: TurnConfig,
    /// Settings for every later turn.
    pub continue_chat: TurnConfig,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Provider request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Force the mock provider even when a key is present.
    pub mock: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            new_chat: TurnConfig {
                model: "gpt-4.1".to_string(),
                json_object: true,
            },
            continue_chat: TurnConfig {
                model: "gpt-4".to_string(),
                json_object: false,
            },
            temperature: 0.7,
            max_tokens: 500,
            request_timeout_secs: 120,
            mock: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("OPEN_AI_API_KEY")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|key| !key.trim().is_empty())
        {
            config = config.with_api_key(key);
        }
        if let Some(base_url) = lookup("SWELLYO_OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("SWELLYO_NEW_CHAT_MODEL") {
            config.new_chat.model = model;
        }
        if let Some(model) = lookup("SWELLYO_CONTINUE_MODEL") {
            config.continue_chat.model = model;
        }
        if let Some(value) = parsed(&lookup, "PORT")? {
            config = config.with_port(value);
        }
        if let Some(value) = parsed(&lookup, "SWELLYO_TEMPERATURE")? {
            config.temperature = value;
        }
        if let Some(value) = parsed(&lookup, "SWELLYO_MAX_TOKENS")? {
            config.max_tokens = value;
        }
        if let Some(value) = parsed(&lookup, "SWELLYO_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs = value;
        }
        if let Some(value) = flag(&lookup, "SWELLYO_CONTINUE_JSON")? {
            config = config.with_json_follow_ups(value);
        }
        if let Some(value) = flag(&lookup, "SWELLYO_MOCK")? {
            config.mock = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(
                "temperature must be within 0.0..=2.0".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be > 0".to_string()));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.new_chat.model.trim().is_empty() || self.continue_chat.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model names must not be empty".to_string()));
        }

        Url::parse(&self.base_url)?;
        Ok(())
    }

    /// Whether replies come from the offline mock provider.
    #[must_use]
    pub const fn uses_mock(&self) -> bool {
        self.mock || self.api_key.is_none()
    }

    /// Set the provider API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the listening port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Apply the JSON-object constraint to follow-up turns too.
    #[must_use]
    pub const fn with_json_follow_ups(mut self, enabled: bool) -> Self {
        self.continue_chat.json_object = enabled;
        self
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str) -> ConfigResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}

fn flag<F>(lookup: &F, key: &'static str) -> ConfigResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value }),
        })
        .transpose()
}
