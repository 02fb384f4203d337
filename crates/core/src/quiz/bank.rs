use std::collections::HashMap;

use crate::model::{LevelCatalog, SubLevelId};
use crate::quiz::question::{Question, QuestionError};

/// (sub-level, prompt, choices, correct index, context sentence)
type Row = (
    &'static str,
    &'static str,
    [&'static str; 4],
    usize,
    Option<&'static str>,
);

#[rustfmt::skip]
const VOCABULARY: &[Row] = &[
    ("easy-1", "What does \"happy\" mean?", ["Sad", "Joyful", "Angry", "Tired"], 1, None),
    ("easy-1", "Which word means \"big\"?", ["Tiny", "Large", "Thin", "Short"], 1, None),
    ("easy-1", "What is the opposite of \"hot\"?", ["Warm", "Cold", "Wet", "Dry"], 1, None),
    ("easy-1", "A \"dog\" is a kind of...", ["Animal", "Plant", "Food", "Tool"], 0, None),

    ("easy-2", "What does \"quick\" mean?", ["Slow", "Fast", "Late", "Heavy"], 1, None),
    ("easy-2", "Which word means \"to shut\"?", ["Open", "Close", "Push", "Lift"], 1, None),
    ("easy-2", "What does \"begin\" mean?", ["Finish", "Stop", "Start", "Wait"], 2, None),
    ("easy-2", "What do you call the meal in the morning?", ["Dinner", "Lunch", "Snack", "Breakfast"], 3, None),

    ("easy-3", "What does \"brave\" mean?", ["Scared", "Courageous", "Lazy", "Rude"], 1, Some("The brave firefighter ran into the burning house.")),
    ("easy-3", "What does \"tiny\" mean?", ["Very small", "Very tall", "Very loud", "Very old"], 0, None),
    ("easy-3", "Which word means \"to look at\"?", ["Hear", "Watch", "Taste", "Smell"], 1, None),
    ("easy-3", "What is the opposite of \"early\"?", ["Soon", "Late", "First", "Now"], 1, None),

    ("medium-1", "What is a synonym of \"enormous\"?", ["Huge", "Narrow", "Fragile", "Brief"], 0, None),
    ("medium-1", "What is an antonym of \"generous\"?", ["Kind", "Selfish", "Gentle", "Honest"], 1, None),
    ("medium-1", "What does \"reluctant\" mean?", ["Eager", "Unwilling", "Curious", "Proud"], 1, Some("She was reluctant to jump into the cold water.")),
    ("medium-1", "What is a synonym of \"ancient\"?", ["Modern", "Very old", "Broken", "Famous"], 1, None),

    ("medium-2", "What does \"cautious\" mean?", ["Careful", "Careless", "Cheerful", "Clumsy"], 0, Some("Be cautious when crossing the busy street.")),
    ("medium-2", "What is an antonym of \"expand\"?", ["Grow", "Stretch", "Shrink", "Spread"], 2, None),
    ("medium-2", "What does \"fragile\" mean?", ["Strong", "Easily broken", "Heavy", "Shiny"], 1, None),
    ("medium-2", "What is a synonym of \"scarce\"?", ["Plentiful", "Rare", "Cheap", "Common"], 1, None),

    ("medium-3", "What does \"diligent\" mean?", ["Lazy", "Hardworking", "Noisy", "Forgetful"], 1, Some("The diligent student finished every assignment on time.")),
    ("medium-3", "What is an antonym of \"victory\"?", ["Triumph", "Defeat", "Success", "Reward"], 1, None),
    ("medium-3", "What does \"vivid\" mean?", ["Dull", "Bright and clear", "Blurry", "Empty"], 1, None),
    ("medium-3", "What is a synonym of \"assist\"?", ["Hinder", "Help", "Ignore", "Leave"], 1, None),

    ("hard-1", "What does \"ephemeral\" mean?", ["Lasting forever", "Short-lived", "Very large", "Deeply hidden"], 1, Some("The beauty of the cherry blossoms is ephemeral.")),
    ("hard-1", "What does \"ubiquitous\" mean?", ["Rare", "Found everywhere", "Dangerous", "Invisible"], 1, None),
    ("hard-1", "What is a synonym of \"benevolent\"?", ["Kind-hearted", "Cruel", "Greedy", "Sly"], 0, None),
    ("hard-1", "What does \"meticulous\" mean?", ["Careless", "Extremely careful", "Very fast", "Confused"], 1, None),

    ("hard-2", "What does \"pragmatic\" mean?", ["Idealistic", "Practical", "Emotional", "Forgetful"], 1, None),
    ("hard-2", "What is an antonym of \"candid\"?", ["Honest", "Frank", "Deceptive", "Open"], 2, None),
    ("hard-2", "What does \"resilient\" mean?", ["Quick to recover", "Easily hurt", "Always tired", "Very stubborn"], 0, Some("The resilient town rebuilt quickly after the typhoon.")),
    ("hard-2", "What does \"ambiguous\" mean?", ["Clear", "Having more than one meaning", "Very loud", "Well known"], 1, None),

    ("hard-3", "What does \"serendipity\" mean?", ["Bad luck", "A happy accident", "A careful plan", "A sad ending"], 1, None),
    ("hard-3", "What is a synonym of \"eloquent\"?", ["Articulate", "Silent", "Awkward", "Rude"], 0, None),
    ("hard-3", "What does \"obsolete\" mean?", ["Brand new", "No longer in use", "Very popular", "Expensive"], 1, None),
    ("hard-3", "What does \"tenacious\" mean?", ["Giving up easily", "Persistent", "Gentle", "Forgetful"], 1, Some("The tenacious climber reached the summit despite the storm.")),
];

/// Questions available for each sub-level, in play order.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    by_sub_level: HashMap<SubLevelId, Vec<Question>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in vocabulary builder questions matching [`LevelCatalog::vocabulary`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if a built-in row is malformed.
    pub fn vocabulary() -> Result<Self, QuestionError> {
        let mut bank = Self::new();
        for &(sub, prompt, choices, correct, context) in VOCABULARY {
            let question = Question::new(
                prompt,
                choices.iter().map(|c| (*c).to_owned()).collect(),
                correct,
                context.map(str::to_owned),
            )?;
            bank.insert(SubLevelId::builtin(sub), question);
        }
        Ok(bank)
    }

    pub fn insert(&mut self, sub_level: SubLevelId, question: Question) {
        self.by_sub_level.entry(sub_level).or_default().push(question);
    }

    /// Questions for a sub-level, or an empty slice if none are registered.
    #[must_use]
    pub fn questions(&self, sub_level: &SubLevelId) -> &[Question] {
        self.by_sub_level
            .get(sub_level)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Sub-levels of `catalog` that have no questions.
    #[must_use]
    pub fn missing_for(&self, catalog: &LevelCatalog) -> Vec<SubLevelId> {
        catalog
            .levels()
            .iter()
            .flat_map(|level| level.sub_levels())
            .filter(|sub| self.questions(sub.id()).is_empty())
            .map(|sub| sub.id().clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_bank_covers_every_catalog_sub_level() {
        let bank = QuestionBank::vocabulary().unwrap();
        assert!(bank.missing_for(&LevelCatalog::vocabulary()).is_empty());
    }

    #[test]
    fn unknown_sub_level_has_no_questions() {
        let bank = QuestionBank::vocabulary().unwrap();
        assert!(bank.questions(&SubLevelId::new("nope").unwrap()).is_empty());
        assert_eq!(bank.questions(&SubLevelId::new("easy-1").unwrap()).len(), 4);
    }
}
