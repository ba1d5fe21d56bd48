// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Startup configuration. Immutable once the server is running.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    pub model: String,
    pub api_url: String,
    pub static_dir: PathBuf,
    pub upstream_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_api_key())
            .field("port", &self.port)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("static_dir", &self.static_dir)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENROUTER_API_KEY").ok_or(ConfigError::Missing("OPENROUTER_API_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => None,
        };

        Ok(Self {
            api_key,
            port,
            model: get("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: get("OPENROUTER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            upstream_timeout,
        })
    }

    /// Origin the relay presents to the upstream as its referer.
    pub fn referer(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    /// First 15 characters of the key, safe to print.
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(15).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk-or-v1-abcdef")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.static_dir, PathBuf::from("."));
        assert_eq!(config.upstream_timeout, None);
        assert_eq!(config.referer(), "http://localhost:3000");
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("OPENROUTER_API_KEY"));

        let err = Config::from_lookup(lookup(&[("OPENROUTER_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("OPENROUTER_API_KEY"));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "key"),
            ("PORT", "8080"),
            ("MODEL", "openai/gpt-4o-mini"),
            ("STATIC_DIR", "public"),
            ("UPSTREAM_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.referer(), "http://localhost:8080");
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[("OPENROUTER_API_KEY", "key"), ("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = Config::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "key"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "UPSTREAM_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn api_key_is_masked() {
        let config = Config::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk-or-v1-0123456789abcdef")])).unwrap();
        assert_eq!(config.masked_api_key(), "sk-or-v1-012345...");
        assert!(!format!("{:?}", config).contains("abcdef"));
    }
}
