//! Runtime settings read from the environment (after `.env` is loaded).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

pub const DEFAULT_AUTH_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_CALCULATOR_API_URL: &str = "http://localhost:8002";
pub const DEFAULT_TOKEN_PATH: &str = ".gpa_calc/token";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/gpa_calc.log";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub auth_api_url: String,
    pub calculator_api_url: String,
    pub token_path: PathBuf,
    pub log_file_path: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or empty keys take their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            match lookup(key).filter(|v| !v.trim().is_empty()) {
                Some(value) => value,
                None => {
                    debug!(key, default, "Using default");
                    default.to_string()
                }
            }
        };

        let timeout_secs: u64 = get("HTTP_TIMEOUT_SECS", &DEFAULT_HTTP_TIMEOUT_SECS.to_string())
            .trim()
            .parse()
            .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            auth_api_url: get("AUTH_API_URL", DEFAULT_AUTH_API_URL),
            calculator_api_url: get("CALCULATOR_API_URL", DEFAULT_CALCULATOR_API_URL),
            token_path: get("GPA_TOKEN_PATH", DEFAULT_TOKEN_PATH).into(),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH).into(),
            http_timeout: Duration::from_secs(timeout_secs),
        })
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.auth_api_url, DEFAULT_AUTH_API_URL);
        assert_eq!(config.calculator_api_url, DEFAULT_CALCULATOR_API_URL);
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("AUTH_API_URL", "https://auth.example.edu"),
            ("CALCULATOR_API_URL", "https://calc.example.edu"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.auth_api_url, "https://auth.example.edu");
        assert_eq!(config.calculator_api_url, "https://calc.example.edu");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_empty_value_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[("AUTH_API_URL", "  ")])).unwrap();
        assert_eq!(config.auth_api_url, DEFAULT_AUTH_API_URL);
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(Config::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "soon")])).is_err());
    }
}
