mod bank;
mod question;
mod session;

pub use bank::QuestionBank;
pub use question::{CHOICES_PER_QUESTION, ChoiceLabel, Question, QuestionError};
pub use session::{
    Advance, AnswerFeedback, POINTS_PER_QUESTION, QuizError, QuizSession, QuizState,
    percentage_of,
};
