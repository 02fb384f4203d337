use std::fmt;

use thiserror::Error;

/// Number of choices every question must offer (labeled A through D).
pub const CHOICES_PER_QUESTION: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected 4 choices, got {0}")]
    ChoiceCount(usize),

    #[error("correct index {index} is out of bounds for {len} choices")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

/// Positional label of a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    pub const ALL: [ChoiceLabel; CHOICES_PER_QUESTION] =
        [ChoiceLabel::A, ChoiceLabel::B, ChoiceLabel::C, ChoiceLabel::D];

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ChoiceLabel::A => 0,
            ChoiceLabel::B => 1,
            ChoiceLabel::C => 2,
            ChoiceLabel::D => 3,
        }
    }

    /// Parses `a`..`d` case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(ChoiceLabel::A),
            "B" => Some(ChoiceLabel::B),
            "C" => Some(ChoiceLabel::C),
            "D" => Some(ChoiceLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChoiceLabel::A => "A",
            ChoiceLabel::B => "B",
            ChoiceLabel::C => "C",
            ChoiceLabel::D => "D",
        };
        f.write_str(label)
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    context: Option<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are not exactly
    /// four choices, or `correct_index` does not point at one of them.
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        context: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if choices.len() != CHOICES_PER_QUESTION {
            return Err(QuestionError::ChoiceCount(choices.len()));
        }
        if correct_index >= choices.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                len: choices.len(),
            });
        }

        Ok(Self {
            prompt,
            choices,
            correct_index,
            context: context
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Choices paired with their A-D labels.
    pub fn labeled_choices(&self) -> impl Iterator<Item = (ChoiceLabel, &str)> {
        ChoiceLabel::ALL
            .into_iter()
            .zip(self.choices.iter().map(String::as_str))
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Optional sentence displayed above the prompt.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("choice {i}")).collect()
    }

    #[test]
    fn rejects_wrong_choice_count() {
        assert_eq!(
            Question::new("Q", choices(3), 0, None).unwrap_err(),
            QuestionError::ChoiceCount(3)
        );
        assert_eq!(
            Question::new("Q", choices(5), 0, None).unwrap_err(),
            QuestionError::ChoiceCount(5)
        );
    }

    #[test]
    fn rejects_out_of_range_answer() {
        assert_eq!(
            Question::new("Q", choices(4), 4, None).unwrap_err(),
            QuestionError::CorrectIndexOutOfRange { index: 4, len: 4 }
        );
    }

    #[test]
    fn blank_context_is_dropped() {
        let q = Question::new("Q", choices(4), 1, Some("  ".into())).unwrap();
        assert!(q.context().is_none());
        assert!(q.is_correct(1));
    }

    #[test]
    fn labels_follow_position() {
        let q = Question::new("Q", choices(4), 0, None).unwrap();
        let labels: Vec<String> = q.labeled_choices().map(|(l, _)| l.to_string()).collect();
        assert_eq!(labels, ["A", "B", "C", "D"]);
        assert_eq!(ChoiceLabel::parse(" c "), Some(ChoiceLabel::C));
        assert_eq!(ChoiceLabel::parse("e"), None);
        assert_eq!(ChoiceLabel::from_index(3).map(ChoiceLabel::index), Some(3));
    }
}
