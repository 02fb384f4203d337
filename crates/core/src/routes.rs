//! Screen identifiers and the payload each one receives.

use std::fmt;

use crate::model::{Registration, SubLevelId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    InterestSelection(Registration),
    Home,
    Progress,
    Profile,
    WordOfTheDay,
    VocabularyBuilder,
    /// `level_id` is the sub-level being played; it is also its progress key.
    VocabularyGame { level_id: SubLevelId },
    GrammarPractice,
    ReadingComprehension,
    FilipinoToEnglish,
    SentenceConstruction,
}

impl Route {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::InterestSelection(_) => "InterestSelection",
            Route::Home => "Home",
            Route::Progress => "Progress",
            Route::Profile => "Profile",
            Route::WordOfTheDay => "WordOfTheDay",
            Route::VocabularyBuilder => "VocabularyBuilder",
            Route::VocabularyGame { .. } => "VocabularyGame",
            Route::GrammarPractice => "GrammarPractice",
            Route::ReadingComprehension => "ReadingComprehension",
            Route::FilipinoToEnglish => "FilipinoToEnglish",
            Route::SentenceConstruction => "SentenceConstruction",
        }
    }

    /// Screen a successful login lands on.
    #[must_use]
    pub fn after_login() -> Self {
        Route::WordOfTheDay
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Learning topic tile on the home dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topic {
    pub title: &'static str,
    pub description: &'static str,
}

pub const TOPICS: [Topic; 5] = [
    Topic { title: "Vocabulary Builder", description: "Learn new words with flashcards" },
    Topic { title: "Grammar Practice", description: "Master English grammar rules" },
    Topic { title: "Reading Comprehension", description: "Improve reading skills" },
    Topic { title: "Filipino to English", description: "Practice translation skills" },
    Topic { title: "Sentence Construction", description: "Arrange jumbled words" },
];

impl Topic {
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        match self.title {
            "Vocabulary Builder" => Some(Route::VocabularyBuilder),
            "Grammar Practice" => Some(Route::GrammarPractice),
            "Reading Comprehension" => Some(Route::ReadingComprehension),
            "Filipino to English" => Some(Route::FilipinoToEnglish),
            "Sentence Construction" => Some(Route::SentenceConstruction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegistrationDraft;

    #[test]
    fn every_topic_has_a_route() {
        for topic in TOPICS {
            assert!(topic.route().is_some(), "{} has no route", topic.title);
        }
    }

    #[test]
    fn payload_routes_keep_their_screen_name() {
        let reg = RegistrationDraft {
            full_name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(Route::InterestSelection(reg).name(), "InterestSelection");

        let game = Route::VocabularyGame {
            level_id: SubLevelId::new("easy-1").unwrap(),
        };
        assert_eq!(game.to_string(), "VocabularyGame");
        assert_eq!(Route::after_login(), Route::WordOfTheDay);
    }
}
