//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::model::{AccountError, ProgressError, SubLevelId};
use quest_core::quiz::{QuestionError, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressStoreError {
    #[error(transparent)]
    Invalid(#[from] ProgressError),
    /// The update is kept in memory but could not be written through.
    #[error("progress kept in memory but not persisted: {0}")]
    Persist(#[from] StorageError),
    #[error("progress could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("preference could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("unknown sub-level: {0}")]
    UnknownSubLevel(SubLevelId),
    #[error("sub-level {0} is locked")]
    Locked(SubLevelId),
    #[error("no questions available for sub-level {0}")]
    NoQuestions(SubLevelId),
    #[error("quiz for {0} finished without reporting a score")]
    CompletionMissing(SubLevelId),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Progress(#[from] ProgressStoreError),
}

/// Errors emitted by `WordOfTheDayService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordOfTheDayError {
    #[error("word of the day source is not configured")]
    Disabled,
    #[error("word of the day response is missing a word or definition")]
    Incomplete,
    #[error("word of the day request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
