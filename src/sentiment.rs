//! Sentiment analysis of user messages.
//!
//! The score only picks the [`Tone`] of the system prompt; it never touches
//! the conversation state.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::advisor::Tone;
use crate::config::SentimentConfig;
use crate::error::SentimentError;

/// Scores how positive a piece of text is.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Sentiment in [-1, 1], or `None` if the service had no opinion.
    async fn score(&self, text: &str) -> Result<Option<f64>, SentimentError>;
}

/// Resolve the tone for `text`, treating any failure as neutral.
pub async fn detect_tone(analyzer: &dyn SentimentAnalyzer, text: &str) -> Tone {
    match analyzer.score(text).await {
        Ok(Some(score)) => Tone::from_score(score),
        Ok(None) => Tone::Neutral,
        Err(e) => {
            tracing::warn!("Sentiment analysis failed, continuing without it: {}", e);
            Tone::Neutral
        }
    }
}

/// Build the analyzer described by `config`, or [`NoSentiment`] if absent.
pub fn create_analyzer(config: Option<&SentimentConfig>) -> Arc<dyn SentimentAnalyzer> {
    match config {
        Some(config) => {
            tracing::info!(url = %config.url, "Sentiment analysis enabled");
            Arc::new(HttpSentimentAnalyzer::new(config.clone()))
        }
        None => {
            tracing::info!("Sentiment analysis disabled");
            Arc::new(NoSentiment)
        }
    }
}

/// Analyzer that never has an opinion.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSentiment;

#[async_trait]
impl SentimentAnalyzer for NoSentiment {
    async fn score(&self, _text: &str) -> Result<Option<f64>, SentimentError> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct AnalyticsResponse {
    #[serde(default)]
    sentiment: Option<SentimentBlock>,
}

#[derive(Debug, Deserialize)]
struct SentimentBlock {
    #[serde(default)]
    score: Option<f64>,
}

/// Text-analytics HTTP client.
///
/// Posts `{"text": ..., "features": ["sentiment"]}` with a bearer token and
/// reads `sentiment.score` from the reply.
pub struct HttpSentimentAnalyzer {
    config: SentimentConfig,
    client: reqwest::Client,
}

impl HttpSentimentAnalyzer {
    pub fn new(config: SentimentConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SentimentAnalyzer for HttpSentimentAnalyzer {
    async fn score(&self, text: &str) -> Result<Option<f64>, SentimentError> {
        let body = serde_json::json!({
            "text": text,
            "features": ["sentiment"],
        });

        let resp = self
            .client
            .post(&self.config.url)
            .bearer_auth(self.config.api_key.expose_secret())
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SentimentError::Timeout {
                        timeout: self.config.timeout,
                    }
                } else {
                    SentimentError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SentimentError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: AnalyticsResponse =
            resp.json()
                .await
                .map_err(|e| SentimentError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        let score = parsed.sentiment.and_then(|s| s.score);
        tracing::debug!(score = ?score, "Sentiment scored");
        Ok(score)
    }
}
