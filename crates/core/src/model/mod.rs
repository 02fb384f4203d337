mod account;
mod ids;
mod level;
mod progress;
mod word;

pub use account::{
    AccountError, Avatar, Credentials, INTERESTS, IdentityOutcome, Interest, InterestSelection,
    LoginDraft, MIN_INTERESTS, Registration, RegistrationDraft,
};
pub use ids::{IdError, LevelId, SubLevelId};
pub use level::{LevelCatalog, LevelDef, LevelError, SubLevel};
pub use progress::{
    Badge, LevelOverview, MAX_SCORE, PASSING, ProgressError, ProgressState, SubLevelOverview,
    SubLevelProgress, badge_for, count_levels_passed, is_level_passed, is_level_unlocked,
    is_sub_level_unlocked,
};
pub use word::{WordOfTheDay, WordSource, WordSourceError};
