use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{LevelId, SubLevelId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level title cannot be empty")]
    EmptyTitle,

    #[error("sub-level title cannot be empty")]
    EmptySubLevelTitle,

    #[error("level {0} has no sub-levels")]
    NoSubLevels(LevelId),

    #[error("duplicate level id: {0}")]
    DuplicateLevel(LevelId),

    #[error("duplicate sub-level id: {0}")]
    DuplicateSubLevel(SubLevelId),

    #[error("catalog must contain at least one level")]
    EmptyCatalog,
}

//
// ─── DEFINITIONS ───────────────────────────────────────────────────────────────
//

/// Smallest unit of practice content with its own score and unlock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubLevel {
    id: SubLevelId,
    title: String,
}

impl SubLevel {
    /// # Errors
    ///
    /// Returns `LevelError::EmptySubLevelTitle` if the title is blank.
    pub fn new(id: SubLevelId, title: impl Into<String>) -> Result<Self, LevelError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LevelError::EmptySubLevelTitle);
        }
        Ok(Self { id, title })
    }

    #[must_use]
    pub fn id(&self) -> &SubLevelId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A difficulty tier composed of an ordered chain of sub-levels.
///
/// The order of `sub_levels` is the unlock chain: each sub-level opens once the
/// one before it has been passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDef {
    id: LevelId,
    ordinal: u32,
    title: String,
    description: String,
    sub_levels: Vec<SubLevel>,
}

impl LevelDef {
    /// Creates a level definition. The ordinal defaults to 1 and is reassigned
    /// from position when the level is placed in a [`LevelCatalog`].
    ///
    /// # Errors
    ///
    /// Returns `LevelError` if the title is blank, there are no sub-levels, or
    /// two sub-levels share an id.
    pub fn new(
        id: LevelId,
        title: impl Into<String>,
        description: impl Into<String>,
        sub_levels: Vec<SubLevel>,
    ) -> Result<Self, LevelError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(LevelError::EmptyTitle);
        }
        if sub_levels.is_empty() {
            return Err(LevelError::NoSubLevels(id));
        }
        let mut seen = HashSet::new();
        for sub in &sub_levels {
            if !seen.insert(sub.id()) {
                return Err(LevelError::DuplicateSubLevel(sub.id().clone()));
            }
        }

        Ok(Self {
            id,
            ordinal: 1,
            title,
            description: description.into().trim().to_owned(),
            sub_levels,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LevelId {
        &self.id
    }

    /// 1-based display number of the level.
    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn sub_levels(&self) -> &[SubLevel] {
        &self.sub_levels
    }

    #[must_use]
    pub fn sub_level(&self, index: usize) -> Option<&SubLevel> {
        self.sub_levels.get(index)
    }

    #[must_use]
    pub fn index_of(&self, id: &SubLevelId) -> Option<usize> {
        self.sub_levels.iter().position(|sub| sub.id() == id)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Static, ordered list of levels. Order defines which level unlocks which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDef>,
}

impl LevelCatalog {
    /// Build a catalog, numbering levels 1..=n by position.
    ///
    /// # Errors
    ///
    /// Returns `LevelError` if the list is empty or ids collide, including
    /// sub-level ids shared between two levels (progress keys must be unique).
    pub fn new(mut levels: Vec<LevelDef>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }

        let mut level_ids = HashSet::new();
        let mut sub_ids = HashSet::new();
        for level in &levels {
            if !level_ids.insert(level.id.clone()) {
                return Err(LevelError::DuplicateLevel(level.id.clone()));
            }
            for sub in &level.sub_levels {
                if !sub_ids.insert(sub.id.clone()) {
                    return Err(LevelError::DuplicateSubLevel(sub.id.clone()));
                }
            }
        }

        for (pos, level) in levels.iter_mut().enumerate() {
            level.ordinal = u32::try_from(pos + 1).unwrap_or(u32::MAX);
        }

        Ok(Self { levels })
    }

    /// Built-in vocabulary builder catalog: easy, medium and hard with three
    /// sub-levels each.
    #[must_use]
    pub fn vocabulary() -> Self {
        let tiers = [
            ("easy", "Easy", "Everyday words and simple meanings"),
            ("medium", "Medium", "Synonyms, antonyms and usage in context"),
            ("hard", "Hard", "Advanced vocabulary and nuanced definitions"),
        ];

        let levels = tiers
            .into_iter()
            .zip(1..)
            .map(|((id, title, description), ordinal)| LevelDef {
                id: LevelId::builtin(id),
                ordinal,
                title: title.to_owned(),
                description: description.to_owned(),
                sub_levels: (1..=3)
                    .map(|n| SubLevel {
                        id: SubLevelId::builtin(format!("{id}-{n}")),
                        title: format!("{title} {n}"),
                    })
                    .collect(),
            })
            .collect();

        Self { levels }
    }

    #[must_use]
    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    #[must_use]
    pub fn level(&self, id: &LevelId) -> Option<&LevelDef> {
        self.levels.iter().find(|level| level.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: &LevelId) -> Option<usize> {
        self.levels.iter().position(|level| level.id() == id)
    }

    /// The level immediately before `id` in static order, if any.
    #[must_use]
    pub fn previous(&self, id: &LevelId) -> Option<&LevelDef> {
        let pos = self.position(id)?;
        pos.checked_sub(1).and_then(|prev| self.levels.get(prev))
    }

    /// Locate the level owning a sub-level and the sub-level's index in it.
    #[must_use]
    pub fn find_sub_level(&self, id: &SubLevelId) -> Option<(&LevelDef, usize)> {
        self.levels
            .iter()
            .find_map(|level| level.index_of(id).map(|index| (level, index)))
    }
}
