use std::sync::Arc;

use quest_core::model::{
    LevelCatalog, PASSING, SubLevelId, is_level_passed, is_sub_level_unlocked,
};
use quest_core::quiz::{Advance, AnswerFeedback, QuestionBank, QuizSession, percentage_of};
use tokio::sync::oneshot;

use crate::error::QuizServiceError;
use crate::progress_store::ProgressStore;

/// A running quiz for one sub-level.
#[derive(Debug)]
pub struct ActiveQuiz {
    sub_level: SubLevelId,
    session: QuizSession,
    completed: oneshot::Receiver<u32>,
}

impl ActiveQuiz {
    #[must_use]
    pub fn sub_level(&self) -> &SubLevelId {
        &self.sub_level
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }
}

/// Result of a finished quiz after it was written back to progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub best: u8,
    pub passed: bool,
    pub level_passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Next { index: usize },
    Finished(QuizOutcome),
}

/// Starts quizzes for unlocked sub-levels and records their results.
#[derive(Clone)]
pub struct QuizService {
    catalog: Arc<LevelCatalog>,
    bank: Arc<QuestionBank>,
    progress: Arc<ProgressStore>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        catalog: Arc<LevelCatalog>,
        bank: Arc<QuestionBank>,
        progress: Arc<ProgressStore>,
    ) -> Self {
        Self {
            catalog,
            bank,
            progress,
        }
    }

    /// Start a quiz for `sub_level` if it is unlocked in the current progress.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the sub-level is unknown, locked, or has
    /// no questions.
    pub async fn start(&self, sub_level: &SubLevelId) -> Result<ActiveQuiz, QuizServiceError> {
        let (level, index) = self
            .catalog
            .find_sub_level(sub_level)
            .ok_or_else(|| QuizServiceError::UnknownSubLevel(sub_level.clone()))?;

        let state = self.progress.load().await;
        if !is_sub_level_unlocked(&self.catalog, level, index, &state) {
            return Err(QuizServiceError::Locked(sub_level.clone()));
        }

        let questions = self.bank.questions(sub_level).to_vec();
        if questions.is_empty() {
            return Err(QuizServiceError::NoQuestions(sub_level.clone()));
        }

        let (tx, completed) = oneshot::channel();
        let session = QuizSession::new(questions)?.with_completion(move |score| {
            if tx.send(score).is_err() {
                tracing::debug!(score, "quiz dropped before its score was delivered");
            }
        });

        tracing::debug!(sub_level = %sub_level, questions = session.len(), "quiz started");
        Ok(ActiveQuiz {
            sub_level: sub_level.clone(),
            session,
            completed,
        })
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for invalid transitions.
    pub fn select(
        &self,
        quiz: &mut ActiveQuiz,
        choice: usize,
    ) -> Result<AnswerFeedback, QuizServiceError> {
        Ok(quiz.session.select(choice)?)
    }

    /// Move to the next question, recording the result once the quiz finishes.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for invalid transitions,
    /// `QuizServiceError::CompletionMissing` if the session finished without
    /// its completion hook reporting a score, and `QuizServiceError::Progress`
    /// if the result cannot be recorded.
    pub async fn advance(&self, quiz: &mut ActiveQuiz) -> Result<QuizStep, QuizServiceError> {
        match quiz.session.advance()? {
            Advance::Next { index } => Ok(QuizStep::Next { index }),
            Advance::Finished { .. } => {
                let score = quiz
                    .completed
                    .try_recv()
                    .map_err(|_| QuizServiceError::CompletionMissing(quiz.sub_level.clone()))?;
                self.record(quiz, score).await.map(QuizStep::Finished)
            }
        }
    }

    /// Write the score reported by the completion hook back to progress.
    async fn record(&self, quiz: &ActiveQuiz, score: u32) -> Result<QuizOutcome, QuizServiceError> {
        let max_score = quiz.session.max_score();
        let percentage = percentage_of(score, max_score);
        let best = self
            .progress
            .record_attempt(&quiz.sub_level, percentage)
            .await?;

        let state = self.progress.snapshot().await;
        let level_passed = self
            .catalog
            .find_sub_level(&quiz.sub_level)
            .is_some_and(|(level, _)| is_level_passed(level, &state));

        tracing::info!(
            sub_level = %quiz.sub_level,
            score,
            percentage,
            best,
            "quiz finished"
        );
        Ok(QuizOutcome {
            score,
            max_score,
            percentage,
            best,
            passed: percentage >= u32::from(PASSING),
            level_passed,
        })
    }
}
