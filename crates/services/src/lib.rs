#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod preferences_service;
pub mod progress_store;
pub mod quiz_service;
pub mod word_of_the_day_service;

pub use quest_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, PreferencesError, ProgressStoreError, QuizServiceError, WordOfTheDayError,
};
pub use preferences_service::PreferencesService;
pub use progress_store::ProgressStore;
pub use quiz_service::{ActiveQuiz, QuizOutcome, QuizService, QuizStep};
pub use word_of_the_day_service::{WordOfTheDayConfig, WordOfTheDayService};
