use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::SubLevelId;
use crate::model::level::{LevelCatalog, LevelDef};

/// Score at or above which a sub-level (and, transitively, a level) counts as passed.
pub const PASSING: u8 = 70;

/// Upper bound of a stored sub-level score.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(u32),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Stored mastery for one sub-level.
///
/// Both fields are optional on the wire; an absent `score` means the sub-level
/// was never scored, an absent `attempted` means it was never played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubLevelProgress {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "clamped_score"
    )]
    score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attempted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_attempt_at: Option<DateTime<Utc>>,
}

fn clamped_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(raw.map(|value| u8::try_from(value.min(u64::from(MAX_SCORE))).unwrap_or(MAX_SCORE)))
}

impl SubLevelProgress {
    #[must_use]
    pub fn score(&self) -> Option<u8> {
        self.score
    }

    #[must_use]
    pub fn attempted(&self) -> bool {
        self.attempted.unwrap_or(false)
    }

    #[must_use]
    pub fn last_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.last_attempt_at
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.score.is_some_and(|score| score >= PASSING)
    }
}

/// Per-sub-level progress, persisted as a single JSON object keyed by sub-level id.
///
/// Keys appear lazily on first attempt; a missing key reads as "not started".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressState {
    entries: BTreeMap<SubLevelId, SubLevelProgress>,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &SubLevelId) -> Option<&SubLevelProgress> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn score(&self, id: &SubLevelId) -> Option<u8> {
        self.get(id).and_then(SubLevelProgress::score)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubLevelId, &SubLevelProgress)> {
        self.entries.iter()
    }

    /// Apply one finished attempt: mark attempted and keep the best score.
    ///
    /// Returns the stored best score after the update.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::ScoreOutOfRange` if `score` exceeds 100; the
    /// state is left untouched in that case.
    pub fn record_attempt(
        &mut self,
        id: &SubLevelId,
        score: u32,
        at: DateTime<Utc>,
    ) -> Result<u8, ProgressError> {
        let score = u8::try_from(score)
            .ok()
            .filter(|value| *value <= MAX_SCORE)
            .ok_or(ProgressError::ScoreOutOfRange(score))?;

        let entry = self.entries.entry(id.clone()).or_default();
        let best = entry.score.unwrap_or(0).max(score);
        entry.score = Some(best);
        entry.attempted = Some(true);
        entry.last_attempt_at = Some(at);
        Ok(best)
    }

    /// Fold `other` into `self` without ever lowering progress: best score wins,
    /// `attempted` stays true once set, latest timestamp wins.
    pub fn merge(&mut self, other: &ProgressState) {
        for (id, theirs) in &other.entries {
            let ours = self.entries.entry(id.clone()).or_default();
            ours.score = ours.score.max(theirs.score);
            if ours.attempted() || theirs.attempted() {
                ours.attempted = Some(true);
            }
            ours.last_attempt_at = ours.last_attempt_at.max(theirs.last_attempt_at);
        }
    }
}

//
// ─── GATING ────────────────────────────────────────────────────────────────────
//

/// True iff every sub-level of `level` has a score of at least [`PASSING`].
#[must_use]
pub fn is_level_passed(level: &LevelDef, state: &ProgressState) -> bool {
    level
        .sub_levels()
        .iter()
        .all(|sub| state.get(sub.id()).is_some_and(SubLevelProgress::is_passed))
}

/// The first level is always open; any later one opens once its predecessor is passed.
///
/// Levels that are not part of `catalog` are reported locked.
#[must_use]
pub fn is_level_unlocked(catalog: &LevelCatalog, level: &LevelDef, state: &ProgressState) -> bool {
    match catalog.position(level.id()) {
        Some(0) => true,
        Some(_) => catalog
            .previous(level.id())
            .is_some_and(|prev| is_level_passed(prev, state)),
        None => false,
    }
}

/// Sub-level 0 opens with its level; sub-level `i` additionally needs `i - 1` passed.
#[must_use]
pub fn is_sub_level_unlocked(
    catalog: &LevelCatalog,
    level: &LevelDef,
    index: usize,
    state: &ProgressState,
) -> bool {
    if index >= level.sub_levels().len() || !is_level_unlocked(catalog, level, state) {
        return false;
    }
    match index.checked_sub(1).and_then(|prev| level.sub_level(prev)) {
        None => true,
        Some(prev) => state.get(prev.id()).is_some_and(SubLevelProgress::is_passed),
    }
}

#[must_use]
pub fn count_levels_passed(levels: &[LevelDef], state: &ProgressState) -> usize {
    levels
        .iter()
        .filter(|level| is_level_passed(level, state))
        .count()
}

//
// ─── BADGES ────────────────────────────────────────────────────────────────────
//

/// Display label derived from a sub-level's stored progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    NotStarted,
    InProgress,
    Completed,
}

impl Badge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Badge::NotStarted => "Not Started",
            Badge::InProgress => "In Progress",
            Badge::Completed => "Completed",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub fn badge_for(progress: Option<&SubLevelProgress>) -> Badge {
    match progress {
        Some(p) if !p.attempted() => Badge::NotStarted,
        Some(p) if p.is_passed() => Badge::Completed,
        Some(_) => Badge::InProgress,
        None => Badge::NotStarted,
    }
}

//
// ─── OVERVIEW ──────────────────────────────────────────────────────────────────
//

/// Row of the level list: one sub-level with its derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubLevelOverview {
    pub id: SubLevelId,
    pub title: String,
    pub number: usize,
    pub unlocked: bool,
    pub badge: Badge,
    pub best_score: Option<u8>,
}

/// Derived read model for one level in the level list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOverview {
    pub ordinal: u32,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
    pub passed: bool,
    pub sub_levels: Vec<SubLevelOverview>,
}

impl LevelOverview {
    #[must_use]
    pub fn build_all(catalog: &LevelCatalog, state: &ProgressState) -> Vec<Self> {
        catalog
            .levels()
            .iter()
            .map(|level| Self::build(catalog, level, state))
            .collect()
    }

    #[must_use]
    pub fn build(catalog: &LevelCatalog, level: &LevelDef, state: &ProgressState) -> Self {
        let sub_levels = level
            .sub_levels()
            .iter()
            .enumerate()
            .map(|(index, sub)| SubLevelOverview {
                id: sub.id().clone(),
                title: sub.title().to_owned(),
                number: index + 1,
                unlocked: is_sub_level_unlocked(catalog, level, index, state),
                badge: badge_for(state.get(sub.id())),
                best_score: state.score(sub.id()),
            })
            .collect();

        Self {
            ordinal: level.ordinal(),
            title: level.title().to_owned(),
            description: level.description().to_owned(),
            unlocked: is_level_unlocked(catalog, level, state),
            passed: is_level_passed(level, state),
            sub_levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::LevelId;
    use crate::model::level::SubLevel;
    use crate::time::fixed_now;

    fn sid(id: &str) -> SubLevelId {
        SubLevelId::new(id).unwrap()
    }

    fn level(id: &str, subs: &[&str]) -> LevelDef {
        LevelDef::new(
            LevelId::new(id).unwrap(),
            id,
            "",
            subs.iter()
                .map(|s| SubLevel::new(sid(s), *s).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn catalog() -> LevelCatalog {
        LevelCatalog::new(vec![level("easy", &["e1", "e2"]), level("medium", &["m1", "m2"])])
            .unwrap()
    }

    fn state_with(scores: &[(&str, u32)]) -> ProgressState {
        let mut state = ProgressState::new();
        for (id, score) in scores {
            state.record_attempt(&sid(id), *score, fixed_now()).unwrap();
        }
        state
    }

    #[test]
    fn empty_state_opens_only_first_sub_level_of_first_level() {
        let catalog = catalog();
        let state = ProgressState::new();
        let easy = &catalog.levels()[0];
        let medium = &catalog.levels()[1];

        assert_eq!(count_levels_passed(catalog.levels(), &state), 0);
        assert!(is_sub_level_unlocked(&catalog, easy, 0, &state));
        assert!(!is_sub_level_unlocked(&catalog, easy, 1, &state));
        assert!(!is_level_unlocked(&catalog, medium, &state));
        assert!(!is_sub_level_unlocked(&catalog, medium, 0, &state));
    }

    #[test]
    fn second_sub_level_unlocks_exactly_at_passing() {
        let catalog = catalog();
        let easy = &catalog.levels()[0];

        assert!(!is_sub_level_unlocked(&catalog, easy, 1, &state_with(&[("e1", 69)])));
        assert!(is_sub_level_unlocked(&catalog, easy, 1, &state_with(&[("e1", 70)])));
    }

    #[test]
    fn out_of_range_index_is_locked() {
        let catalog = catalog();
        let easy = &catalog.levels()[0];
        assert!(!is_sub_level_unlocked(&catalog, easy, 2, &ProgressState::new()));
    }

    #[test]
    fn level_passes_only_when_every_sub_level_passes() {
        let catalog = catalog();
        let easy = &catalog.levels()[0];
        let medium = &catalog.levels()[1];

        let partial = state_with(&[("e1", 100)]);
        assert!(!is_level_passed(easy, &partial));
        assert!(!is_level_unlocked(&catalog, medium, &partial));

        let full = state_with(&[("e1", 100), ("e2", 70)]);
        assert!(is_level_passed(easy, &full));
        assert!(is_level_unlocked(&catalog, medium, &full));
        assert!(is_sub_level_unlocked(&catalog, medium, 0, &full));
        assert!(!is_sub_level_unlocked(&catalog, medium, 1, &full));
        assert_eq!(count_levels_passed(catalog.levels(), &full), 1);
    }

    #[test]
    fn record_attempt_keeps_best_score() {
        let id = sid("e1");
        let mut state = ProgressState::new();
        state.record_attempt(&id, 50, fixed_now()).unwrap();
        let best = state.record_attempt(&id, 30, fixed_now()).unwrap();

        assert_eq!(best, 50);
        let entry = state.get(&id).unwrap();
        assert_eq!(entry.score(), Some(50));
        assert!(entry.attempted());
    }

    #[test]
    fn record_attempt_rejects_scores_above_max() {
        let mut state = ProgressState::new();
        let err = state.record_attempt(&sid("e1"), 101, fixed_now()).unwrap_err();
        assert_eq!(err, ProgressError::ScoreOutOfRange(101));
        assert!(state.is_empty());
    }

    #[test]
    fn merge_never_lowers_progress() {
        let mut local = state_with(&[("e1", 90)]);
        let persisted = state_with(&[("e1", 40), ("e2", 75)]);
        local.merge(&persisted);

        assert_eq!(local.score(&sid("e1")), Some(90));
        assert_eq!(local.score(&sid("e2")), Some(75));
        assert!(local.get(&sid("e2")).unwrap().attempted());
    }

    #[test]
    fn badges_follow_attempt_and_score() {
        assert_eq!(badge_for(None), Badge::NotStarted);

        let state = state_with(&[("e1", 0), ("e2", 69), ("m1", 70)]);
        assert_eq!(badge_for(state.get(&sid("e1"))), Badge::InProgress);
        assert_eq!(badge_for(state.get(&sid("e2"))), Badge::InProgress);
        assert_eq!(badge_for(state.get(&sid("m1"))), Badge::Completed);
        assert_eq!(Badge::NotStarted.to_string(), "Not Started");
    }

    #[test]
    fn badge_ignores_score_without_attempt_flag() {
        let entry: SubLevelProgress = serde_json::from_str(r#"{"score": 90}"#).unwrap();
        assert_eq!(badge_for(Some(&entry)), Badge::NotStarted);
    }

    #[test]
    fn persisted_blob_uses_plain_keys() {
        let state = state_with(&[("e1", 80)]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["e1"]["score"], 80);
        assert_eq!(json["e1"]["attempted"], true);

        let back: ProgressState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn oversized_persisted_scores_are_clamped() {
        let state: ProgressState =
            serde_json::from_str(r#"{"e1": {"score": 250, "attempted": true}}"#).unwrap();
        assert_eq!(state.score(&sid("e1")), Some(100));
    }

    #[test]
    fn overview_reports_lock_state_and_numbering() {
        let catalog = catalog();
        let state = state_with(&[("e1", 75)]);
        let overview = LevelOverview::build_all(&catalog, &state);

        assert_eq!(overview[0].ordinal, 1);
        assert_eq!(overview[1].ordinal, 2);
        assert!(overview[0].unlocked);
        assert!(!overview[1].unlocked);
        assert_eq!(overview[0].sub_levels[0].badge, Badge::Completed);
        assert!(overview[0].sub_levels[1].unlocked);
        assert_eq!(overview[0].sub_levels[1].badge, Badge::NotStarted);
        assert_eq!(overview[0].sub_levels[1].number, 2);
    }
}
