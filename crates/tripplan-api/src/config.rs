//! Service configuration, read from the environment.
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use tripplan_prompt::{ChatOptions, DEFAULT_MAX_PROMPT_CHARS};

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8787);
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    /// Upstream bearer token. The service still starts without one so the
    /// health check can report it missing.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub max_prompt_chars: usize,
    pub upstream_timeout: Duration,
    /// Used when a request has no prompt. Without it such requests get 400.
    pub fallback_prompt: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fallback_prompt: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        Ok(Self {
            addr: parse_or("TRIPPLAN_ADDR", get("TRIPPLAN_ADDR"), defaults.addr)?,
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(
                "TRIPPLAN_TEMPERATURE",
                get("TRIPPLAN_TEMPERATURE"),
                defaults.temperature,
            )?,
            max_tokens: get("TRIPPLAN_MAX_TOKENS")
                .map(|v| parse("TRIPPLAN_MAX_TOKENS", v))
                .transpose()?,
            max_prompt_chars: parse_or(
                "TRIPPLAN_MAX_PROMPT_CHARS",
                get("TRIPPLAN_MAX_PROMPT_CHARS"),
                defaults.max_prompt_chars,
            )?,
            upstream_timeout: Duration::from_secs(parse_or(
                "TRIPPLAN_UPSTREAM_TIMEOUT_SECS",
                get("TRIPPLAN_UPSTREAM_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
            fallback_prompt: get("TRIPPLAN_FALLBACK_PROMPT"),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => parse(key, v),
        None => Ok(default),
    }
}
