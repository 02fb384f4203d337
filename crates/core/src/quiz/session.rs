use std::fmt;

use thiserror::Error;

use crate::quiz::question::{CHOICES_PER_QUESTION, Question};

/// Points awarded for each correctly answered question.
pub const POINTS_PER_QUESTION: u32 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: QuizState,
    },

    #[error("choice {choice} is out of range for {len} choices")]
    ChoiceOutOfRange { choice: usize, len: usize },
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer { index: usize },
    ShowingFeedback { index: usize, choice: usize },
    Finished { score: u32 },
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizState::AwaitingAnswer { index } => write!(f, "awaiting answer {}", index + 1),
            QuizState::ShowingFeedback { index, .. } => {
                write!(f, "showing feedback for question {}", index + 1)
            }
            QuizState::Finished { score } => write!(f, "finished with score {score}"),
        }
    }
}

/// What the learner sees right after picking a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_index: usize,
    pub awarded: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished { score: u32 },
}

type CompletionHook = Box<dyn FnOnce(u32) + Send>;

/// `score` out of `max_score` scaled to 0..=100, rounded down.
#[must_use]
pub fn percentage_of(score: u32, max_score: u32) -> u32 {
    if max_score == 0 {
        return 0;
    }
    let scaled = u64::from(score.min(max_score)) * 100 / u64::from(max_score);
    u32::try_from(scaled).unwrap_or(100)
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One pass through a fixed, ordered list of multiple-choice questions.
///
/// Each question accepts exactly one choice. After the last question the
/// session is `Finished` and rejects every further transition.
pub struct QuizSession {
    questions: Vec<Question>,
    state: QuizState,
    score: u32,
    answers: Vec<Option<usize>>,
    on_complete: Option<CompletionHook>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if `questions` is empty. Per-question shape
    /// (four choices, answer in range) is already enforced by [`Question::new`].
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            state: QuizState::AwaitingAnswer { index: 0 },
            score: 0,
            answers,
            on_complete: None,
        })
    }

    /// Register a hook called once with the final score when the session finishes.
    #[must_use]
    pub fn with_completion(mut self, hook: impl FnOnce(u32) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, QuizState::Finished { .. })
    }

    /// Question currently on screen; `None` once finished.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        match self.state {
            QuizState::AwaitingAnswer { index } | QuizState::ShowingFeedback { index, .. } => {
                self.questions.get(index)
            }
            QuizState::Finished { .. } => None,
        }
    }

    /// Choice made for each question so far, by position.
    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(&self.questions)
            .filter(|(answer, q)| answer.is_some_and(|choice| q.is_correct(choice)))
            .count()
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.questions.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(POINTS_PER_QUESTION)
    }

    /// Score scaled to 0..=100, rounded down.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage_of(self.score, self.max_score())
    }

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless a question is awaiting an
    /// answer, and `QuizError::ChoiceOutOfRange` for a choice past D. The
    /// session is unchanged on error.
    pub fn select(&mut self, choice: usize) -> Result<AnswerFeedback, QuizError> {
        let QuizState::AwaitingAnswer { index } = self.state else {
            return Err(QuizError::InvalidState {
                action: "select",
                state: self.state,
            });
        };
        if choice >= CHOICES_PER_QUESTION {
            return Err(QuizError::ChoiceOutOfRange {
                choice,
                len: CHOICES_PER_QUESTION,
            });
        }

        let question = &self.questions[index];
        let correct = question.is_correct(choice);
        let awarded = if correct { POINTS_PER_QUESTION } else { 0 };

        self.score += awarded;
        self.answers[index] = Some(choice);
        self.state = QuizState::ShowingFeedback { index, choice };

        Ok(AnswerFeedback {
            correct,
            correct_index: question.correct_index(),
            awarded,
        })
    }

    /// Move past the feedback of the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidState` unless feedback is being shown.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let QuizState::ShowingFeedback { index, .. } = self.state else {
            return Err(QuizError::InvalidState {
                action: "advance",
                state: self.state,
            });
        };

        let next = index + 1;
        if next < self.questions.len() {
            self.state = QuizState::AwaitingAnswer { index: next };
            return Ok(Advance::Next { index: next });
        }

        let score = self.score;
        self.state = QuizState::Finished { score };
        if let Some(hook) = self.on_complete.take() {
            hook(score);
        }
        Ok(Advance::Finished { score })
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("state", &self.state)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn question(correct: usize) -> Question {
        Question::new(
            "Pick one",
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
            None,
        )
        .unwrap()
    }

    fn two_question_session() -> QuizSession {
        QuizSession::new(vec![question(0), question(2)]).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert_eq!(QuizSession::new(Vec::new()).unwrap_err(), QuizError::Empty);
    }

    #[test]
    fn all_correct_scores_twenty() {
        let mut quiz = two_question_session();
        assert_eq!(quiz.state(), QuizState::AwaitingAnswer { index: 0 });

        let fb = quiz.select(0).unwrap();
        assert!(fb.correct);
        assert_eq!(fb.awarded, 10);
        assert_eq!(quiz.advance().unwrap(), Advance::Next { index: 1 });

        quiz.select(2).unwrap();
        assert_eq!(quiz.advance().unwrap(), Advance::Finished { score: 20 });
        assert_eq!(quiz.state(), QuizState::Finished { score: 20 });
        assert_eq!(quiz.percentage(), 100);
    }

    #[test]
    fn correct_then_wrong_scores_ten() {
        let mut quiz = two_question_session();
        quiz.select(0).unwrap();
        quiz.advance().unwrap();
        let fb = quiz.select(1).unwrap();
        assert!(!fb.correct);
        assert_eq!(fb.correct_index, 2);
        assert_eq!(quiz.advance().unwrap(), Advance::Finished { score: 10 });
        assert_eq!(quiz.correct_count(), 1);
        assert_eq!(quiz.percentage(), 50);
    }

    #[test]
    fn second_select_on_same_question_is_rejected() {
        let mut quiz = two_question_session();
        quiz.select(0).unwrap();
        let err = quiz.select(0).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState { action: "select", .. }));
        assert_eq!(quiz.score(), 10);
        assert_eq!(quiz.state(), QuizState::ShowingFeedback { index: 0, choice: 0 });
    }

    #[test]
    fn percentage_rounds_down_and_caps_at_max() {
        assert_eq!(percentage_of(30, 40), 75);
        assert_eq!(percentage_of(10, 30), 33);
        assert_eq!(percentage_of(50, 40), 100);
        assert_eq!(percentage_of(0, 0), 0);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut quiz = two_question_session();
        assert!(matches!(
            quiz.advance().unwrap_err(),
            QuizError::InvalidState { action: "advance", .. }
        ));
    }

    #[test]
    fn out_of_range_choice_leaves_state_alone() {
        let mut quiz = two_question_session();
        assert_eq!(
            quiz.select(4).unwrap_err(),
            QuizError::ChoiceOutOfRange { choice: 4, len: 4 }
        );
        assert_eq!(quiz.state(), QuizState::AwaitingAnswer { index: 0 });
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn finished_session_rejects_everything() {
        let mut quiz = QuizSession::new(vec![question(1)]).unwrap();
        quiz.select(1).unwrap();
        quiz.advance().unwrap();

        assert!(quiz.select(1).is_err());
        assert!(quiz.advance().is_err());
        assert_eq!(quiz.score(), 10);
        assert!(quiz.current().is_none());
    }

    #[test]
    fn completion_hook_fires_once_with_final_score() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut quiz = two_question_session()
            .with_completion(move |score| sink.lock().unwrap().push(score));

        quiz.select(0).unwrap();
        quiz.advance().unwrap();
        assert!(calls.lock().unwrap().is_empty());

        quiz.select(2).unwrap();
        quiz.advance().unwrap();
        let _ = quiz.advance();

        assert_eq!(*calls.lock().unwrap(), vec![20]);
    }
}
