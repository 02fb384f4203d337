use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of interests a new learner has to pick.
pub const MIN_INTERESTS: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountError {
    #[error("please fill in all fields")]
    MissingFields,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("select at least {min} interests (selected {selected})")]
    TooFewInterests { min: usize, selected: usize },

    #[error("unknown interest: {0}")]
    UnknownInterest(String),

    #[error("avatar id cannot be empty")]
    EmptyAvatar,
}

//
// ─── REGISTRATION / LOGIN ──────────────────────────────────────────────────────
//

#[derive(Clone, Debug, Default)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validated registration payload handed to interest selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    full_name: String,
    email: String,
    password: String,
}

impl RegistrationDraft {
    /// # Errors
    ///
    /// Returns `AccountError::MissingFields` if any field is blank and
    /// `AccountError::PasswordMismatch` if the confirmation differs.
    pub fn validate(self) -> Result<Registration, AccountError> {
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        if full_name.is_empty()
            || email.is_empty()
            || self.password.trim().is_empty()
            || self.confirm_password.trim().is_empty()
        {
            return Err(AccountError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        Ok(Registration {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            password: self.password,
        })
    }
}

impl Registration {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    /// # Errors
    ///
    /// Returns `AccountError::MissingFields` if email or password is blank.
    pub fn validate(self) -> Result<Credentials, AccountError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.trim().is_empty() {
            return Err(AccountError::MissingFields);
        }
        Ok(Credentials {
            email: email.to_owned(),
            password: self.password,
        })
    }
}

/// Result reported back by the external identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityOutcome {
    Success,
    Failure(String),
}

impl IdentityOutcome {
    /// Message to surface to the learner, with a generic fallback for blank errors.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            IdentityOutcome::Success => "Login successful!",
            IdentityOutcome::Failure(msg) if msg.trim().is_empty() => "Something went wrong.",
            IdentityOutcome::Failure(msg) => msg,
        }
    }
}

//
// ─── INTERESTS ─────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interest {
    pub title: &'static str,
    pub description: &'static str,
}

pub const INTERESTS: [Interest; 8] = [
    Interest { title: "Adventure Stories", description: "Exciting journeys and quests" },
    Interest { title: "Friendship", description: "Stories about bonds and relationships" },
    Interest { title: "Fantasy & Magic", description: "Magical worlds and creatures" },
    Interest { title: "Music & Arts", description: "Creative expression and performance" },
    Interest { title: "Sports & Games", description: "Athletic activities and competition" },
    Interest { title: "Nature & Animals", description: "Wildlife and environmental themes" },
    Interest { title: "Filipino Culture", description: "Traditional stories and customs" },
    Interest { title: "Family Values", description: "Family bonds and traditions" },
];

/// Toggle set backing the interest picker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterestSelection {
    selected: BTreeSet<&'static str>,
}

impl InterestSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection of an interest; returns whether it is now selected.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UnknownInterest` for titles outside [`INTERESTS`].
    pub fn toggle(&mut self, title: &str) -> Result<bool, AccountError> {
        let interest = INTERESTS
            .iter()
            .find(|i| i.title == title)
            .ok_or_else(|| AccountError::UnknownInterest(title.to_owned()))?;
        if self.selected.remove(interest.title) {
            Ok(false)
        } else {
            self.selected.insert(interest.title);
            Ok(true)
        }
    }

    #[must_use]
    pub fn is_selected(&self, title: &str) -> bool {
        self.selected.contains(title)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// # Errors
    ///
    /// Returns `AccountError::TooFewInterests` below [`MIN_INTERESTS`].
    pub fn confirm(&self) -> Result<Vec<&'static str>, AccountError> {
        if self.selected.len() < MIN_INTERESTS {
            return Err(AccountError::TooFewInterests {
                min: MIN_INTERESTS,
                selected: self.selected.len(),
            });
        }
        Ok(self.selected.iter().copied().collect())
    }
}

//
// ─── AVATAR ────────────────────────────────────────────────────────────────────
//

/// Selected profile avatar, persisted as a JSON string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Avatar(String);

impl Avatar {
    /// # Errors
    ///
    /// Returns `AccountError::EmptyAvatar` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, AccountError> {
        let id = id.into().trim().to_owned();
        if id.is_empty() {
            return Err(AccountError::EmptyAvatar);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Avatar {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Avatar> for String {
    fn from(avatar: Avatar) -> Self {
        avatar.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, pw: &str, confirm: &str) -> RegistrationDraft {
        RegistrationDraft {
            full_name: name.into(),
            email: email.into(),
            password: pw.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn registration_requires_every_field() {
        let err = draft("Ana", "  ", "pw", "pw").validate().unwrap_err();
        assert_eq!(err, AccountError::MissingFields);
    }

    #[test]
    fn whitespace_only_password_counts_as_missing() {
        let err = draft("Ana", "ana@example.com", "   ", "   ")
            .validate()
            .unwrap_err();
        assert_eq!(err, AccountError::MissingFields);

        let err = LoginDraft {
            email: "ana@example.com".into(),
            password: "  ".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AccountError::MissingFields);
    }

    #[test]
    fn registration_requires_matching_passwords() {
        let err = draft("Ana", "ana@example.com", "pw1", "pw2")
            .validate()
            .unwrap_err();
        assert_eq!(err, AccountError::PasswordMismatch);
    }

    #[test]
    fn registration_trims_name_and_email() {
        let reg = draft(" Ana Cruz ", " ana@example.com", "secret", "secret")
            .validate()
            .unwrap();
        assert_eq!(reg.full_name(), "Ana Cruz");
        assert_eq!(reg.email(), "ana@example.com");
    }

    #[test]
    fn login_requires_email_and_password() {
        let err = LoginDraft {
            email: "ana@example.com".into(),
            password: String::new(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AccountError::MissingFields);
    }

    #[test]
    fn identity_failure_falls_back_to_generic_message() {
        assert_eq!(IdentityOutcome::Failure(String::new()).message(), "Something went wrong.");
        assert_eq!(IdentityOutcome::Failure("bad password".into()).message(), "bad password");
    }

    #[test]
    fn interest_toggle_and_minimum() {
        let mut sel = InterestSelection::new();
        assert!(sel.toggle("Friendship").unwrap());
        assert!(sel.toggle("Music & Arts").unwrap());
        assert_eq!(
            sel.confirm().unwrap_err(),
            AccountError::TooFewInterests { min: 3, selected: 2 }
        );

        assert!(!sel.toggle("Friendship").unwrap());
        assert!(!sel.is_selected("Friendship"));

        sel.toggle("Friendship").unwrap();
        sel.toggle("Family Values").unwrap();
        assert_eq!(sel.confirm().unwrap().len(), 3);
        assert!(sel.toggle("Cooking").is_err());
    }

    #[test]
    fn blank_avatar_is_rejected_on_read() {
        assert!(serde_json::from_str::<Avatar>("\"  \"").is_err());
        let avatar: Avatar = serde_json::from_str("\"fox\"").unwrap();
        assert_eq!(avatar.id(), "fox");
    }
}
