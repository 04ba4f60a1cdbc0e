use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_MISTRAL_BASE: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Set {0} environment variable")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration, loaded once at startup.
///
/// | Env Var                | Default                     |
/// |------------------------|-----------------------------|
/// | `MISTRAL_API_KEY`      | required                    |
/// | `MISTRAL_API_BASE`     | `https://api.mistral.ai/v1` |
/// | `MISTRAL_TIMEOUT_SECS` | `60`                        |
/// | `HOST`                 | `0.0.0.0`                   |
/// | `PORT`                 | `8080`                      |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mistral: MistralConfig,
}

#[derive(Clone)]
pub struct MistralConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MistralConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// Credentials for the Gemini image model used by the offline renderer.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mistral = MistralConfig {
            api_key: required(&lookup, "MISTRAL_API_KEY")?,
            base_url: lookup("MISTRAL_API_BASE").unwrap_or_else(|| DEFAULT_MISTRAL_BASE.to_string()),
            timeout_secs: parsed(&lookup, "MISTRAL_TIMEOUT_SECS", 60)?,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 8080)?,
            mistral,
        })
    }
}

impl GeminiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: required(&lookup, "GEMINI_API_KEY")?,
            base_url: lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_BASE.to_string()),
            timeout_secs: parsed(&lookup, "GEMINI_TIMEOUT_SECS", 120)?,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}
