use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Word shown on the word-of-the-day panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOfTheDay {
    pub word: String,
    pub definition: String,
}

impl WordOfTheDay {
    /// Built-in word used whenever the remote source is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            word: "Serendipity".to_owned(),
            definition: "The occurrence of events by chance in a happy or beneficial way."
                .to_owned(),
        }
    }

    /// A fetched word is usable only if both fields carry text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.word.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordSourceError {
    #[error("invalid word-of-the-day URL: {0}")]
    InvalidUrl(String),
    #[error("word-of-the-day URL must use http or https")]
    UnsupportedScheme,
}

/// Validated HTTP endpoint that serves a `WordOfTheDay` JSON document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSource(Url);

impl WordSource {
    /// # Errors
    ///
    /// Returns `WordSourceError` if `raw` is not an absolute http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, WordSourceError> {
        let url =
            Url::parse(raw.trim()).map_err(|err| WordSourceError::InvalidUrl(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(WordSourceError::UnsupportedScheme);
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
