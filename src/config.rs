use std::env;
use std::time::Duration;

use crate::errors::{DeckApiError, Result};

pub const ENV_API_URL: &str = "PITCHDECK_API_URL";
pub const ENV_API_TOKEN: &str = "PITCHDECK_API_TOKEN";
pub const ENV_API_TIMEOUT_SECS: &str = "PITCHDECK_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings of [`crate::client::DeckApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without trailing slash, e.g. `https://decks.example.com`.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Validates `base_url` and builds a config with no token and the default timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(DeckApiError::Config("Base URL cannot be empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DeckApiError::Config(format!(
                "Base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        Ok(ClientConfig {
            base_url: base_url.to_string(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `PITCHDECK_API_URL` (required), `PITCHDECK_API_TOKEN` and
    /// `PITCHDECK_API_TIMEOUT_SECS`. Call `dotenvy::dotenv().ok()` beforehand to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        let mut config = Self::new(lookup(ENV_API_URL)?)?;
        if let Ok(token) = lookup(ENV_API_TOKEN) {
            config = config.with_token(token);
        }
        if let Ok(raw) = lookup(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DeckApiError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_API_TIMEOUT_SECS, raw
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://decks.example.com/"),
            (ENV_API_TOKEN, "secret"),
            (ENV_API_TIMEOUT_SECS, " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://decks.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_url_is_env_error() {
        let result = ClientConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(DeckApiError::EnvVarError(_))));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ClientConfig::new("decks.example.com"),
            Err(DeckApiError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[
                (ENV_API_URL, "http://localhost:5000"),
                (ENV_API_TIMEOUT_SECS, "soon"),
            ])),
            Err(DeckApiError::Config(_))
        ));
        let blank_token = ClientConfig::new("http://localhost").unwrap().with_token("  ");
        assert_eq!(blank_token.api_token, None);
        assert_eq!(blank_token.timeout, DEFAULT_TIMEOUT);
    }
}
