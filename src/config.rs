//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Where and how to reach the sentiment analysis service.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Full URL of the text-analytics endpoint.
    pub url: String,
    pub api_key: SecretString,
    pub timeout: Duration,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Address to bind the HTTP server to.
    pub bind: String,
    pub port: u16,
    /// Sentiment analysis; `None` disables tone detection.
    pub sentiment: Option<SentimentConfig>,
    /// Language used when a request doesn't name one.
    pub default_language: String,
    /// Directory for daily-rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            sentiment: None,
            default_language: "english".to_string(),
            log_dir: None,
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from `LOAN_ADVISOR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("LOAN_ADVISOR_PORT") {
            Some(raw) => parse_value("LOAN_ADVISOR_PORT", &raw)?,
            None => defaults.port,
        };

        let sentiment = match get("LOAN_ADVISOR_SENTIMENT_URL") {
            Some(url) => {
                let api_key = get("LOAN_ADVISOR_SENTIMENT_API_KEY").ok_or_else(|| {
                    ConfigError::MissingRequired {
                        key: "LOAN_ADVISOR_SENTIMENT_API_KEY".to_string(),
                        hint: "Set it, or unset LOAN_ADVISOR_SENTIMENT_URL to disable sentiment analysis."
                            .to_string(),
                    }
                })?;
                let timeout_secs: u64 = match get("LOAN_ADVISOR_SENTIMENT_TIMEOUT_SECS") {
                    Some(raw) => parse_value("LOAN_ADVISOR_SENTIMENT_TIMEOUT_SECS", &raw)?,
                    None => 5,
                };
                Some(SentimentConfig {
                    url,
                    api_key: SecretString::from(api_key),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            bind: get("LOAN_ADVISOR_BIND").unwrap_or(defaults.bind),
            port,
            sentiment,
            default_language: get("LOAN_ADVISOR_DEFAULT_LANGUAGE")
                .unwrap_or(defaults.default_language),
            log_dir: get("LOAN_ADVISOR_LOG_DIR"),
        })
    }

    /// `bind:port` for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}
