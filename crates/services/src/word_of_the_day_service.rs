use std::env;
use std::time::Duration;

use quest_core::model::{WordOfTheDay, WordSource};
use reqwest::Client;

use crate::error::WordOfTheDayError;

#[derive(Clone, Debug)]
pub struct WordOfTheDayConfig {
    pub source: WordSource,
    pub timeout: Duration,
}

impl WordOfTheDayConfig {
    /// Reads `ENGLIQUEST_WORD_URL`; returns `None` when unset or invalid.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let raw = env::var("ENGLIQUEST_WORD_URL").ok()?;
        if raw.trim().is_empty() {
            return None;
        }
        let source = WordSource::parse(&raw)
            .inspect_err(|err| tracing::warn!(error = %err, "ignoring ENGLIQUEST_WORD_URL"))
            .ok()?;
        let timeout = env::var("ENGLIQUEST_WORD_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(Duration::from_secs(5), Duration::from_secs);
        Some(Self { source, timeout })
    }
}

/// Fetches the word of the day, falling back to a built-in word.
#[derive(Clone)]
pub struct WordOfTheDayService {
    client: Client,
    config: Option<WordOfTheDayConfig>,
}

impl WordOfTheDayService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(WordOfTheDayConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<WordOfTheDayConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Today's word; never fails.
    pub async fn today(&self) -> WordOfTheDay {
        match self.fetch().await {
            Ok(word) => word,
            Err(WordOfTheDayError::Disabled) => WordOfTheDay::fallback(),
            Err(err) => {
                tracing::warn!(error = %err, "word of the day unavailable; using fallback");
                WordOfTheDay::fallback()
            }
        }
    }

    /// Fetch the word from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `WordOfTheDayError` when no source is configured, the request
    /// fails, or the response lacks a word or definition.
    pub async fn fetch(&self) -> Result<WordOfTheDay, WordOfTheDayError> {
        let config = self.config.as_ref().ok_or(WordOfTheDayError::Disabled)?;

        let response = self
            .client
            .get(config.source.as_str())
            .timeout(config.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WordOfTheDayError::HttpStatus(response.status()));
        }

        let word: WordOfTheDay = response.json().await?;
        if !word.is_complete() {
            return Err(WordOfTheDayError::Incomplete);
        }
        Ok(WordOfTheDay {
            word: word.word.trim().to_owned(),
            definition: word.definition.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_service_serves_fallback() {
        let service = WordOfTheDayService::new(None);
        assert!(!service.enabled());
        assert!(matches!(
            service.fetch().await.unwrap_err(),
            WordOfTheDayError::Disabled
        ));
        assert_eq!(service.today().await, WordOfTheDay::fallback());
    }

    #[tokio::test]
    async fn unreachable_source_serves_fallback() {
        let config = WordOfTheDayConfig {
            source: WordSource::parse("http://127.0.0.1:9/word").unwrap(),
            timeout: Duration::from_millis(200),
        };
        let service = WordOfTheDayService::new(Some(config));
        assert_eq!(service.today().await, WordOfTheDay::fallback());
    }
}
