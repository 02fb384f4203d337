use std::sync::Arc;

use quest_core::model::LevelCatalog;
use quest_core::quiz::QuestionBank;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::preferences_service::PreferencesService;
use crate::progress_store::ProgressStore;
use crate::quiz_service::QuizService;
use crate::word_of_the_day_service::WordOfTheDayService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<LevelCatalog>,
    progress: Arc<ProgressStore>,
    quiz: Arc<QuizService>,
    preferences: Arc<PreferencesService>,
    word_of_the_day: Arc<WordOfTheDayService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(
            storage,
            clock,
            LevelCatalog::vocabulary(),
            QuestionBank::vocabulary()?,
            WordOfTheDayService::from_env(),
        ))
    }

    /// Build services over an arbitrary storage backend and content set.
    #[must_use]
    pub fn with_storage(
        storage: Storage,
        clock: Clock,
        catalog: LevelCatalog,
        bank: QuestionBank,
        word_of_the_day: WordOfTheDayService,
    ) -> Self {
        let missing = bank.missing_for(&catalog);
        if !missing.is_empty() {
            tracing::warn!(?missing, "sub-levels without questions");
        }

        let catalog = Arc::new(catalog);
        let progress = Arc::new(ProgressStore::new(clock, Arc::clone(&storage.kv)));
        let quiz = Arc::new(QuizService::new(
            Arc::clone(&catalog),
            Arc::new(bank),
            Arc::clone(&progress),
        ));
        let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.kv)));

        Self {
            catalog,
            progress,
            quiz,
            preferences,
            word_of_the_day: Arc::new(word_of_the_day),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LevelCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn word_of_the_day(&self) -> Arc<WordOfTheDayService> {
        Arc::clone(&self.word_of_the_day)
    }
}
