use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::UserId;
use crate::model::text;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

//
// ─── NEW USER ──────────────────────────────────────────────────────────────────
//

/// Validated input for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
}

impl NewUser {
    /// Validates a username and email.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyUsername` if the username is blank, or
    /// `UserError::InvalidEmail` if the email has no `local@domain` shape.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Result<Self, UserError> {
        let username = text::required(username).ok_or(UserError::EmptyUsername)?;
        let email = normalize_email(email.into())?;
        Ok(Self { username, email })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn assign_id(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            created_at,
        }
    }
}

fn normalize_email(raw: String) -> Result<String, UserError> {
    let email = raw.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email.to_owned())
        }
        _ => Err(UserError::InvalidEmail(raw)),
    }
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// A registered account that owns goals and workouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Rebuilds a user loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the stored values no longer validate.
    pub fn from_persisted(
        id: UserId,
        username: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        Ok(NewUser::new(username, email)?.assign_id(id, created_at))
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn new_user_trims_fields() {
        let new = NewUser::new("  testuser ", " test@example.com ").unwrap();
        assert_eq!(new.username(), "testuser");
        assert_eq!(new.email(), "test@example.com");
    }

    #[test]
    fn rejects_blank_username() {
        let err = NewUser::new("   ", "a@b.c").unwrap_err();
        assert_eq!(err, UserError::EmptyUsername);
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "plain", "@example.com", "user@", "a@b@c"] {
            let err = NewUser::new("user", bad).unwrap_err();
            assert!(matches!(err, UserError::InvalidEmail(_)), "{bad}");
        }
    }

    #[test]
    fn assign_id_keeps_fields() {
        let user = NewUser::new("lifter", "lifter@gym.io")
            .unwrap()
            .assign_id(UserId::new(4), fixed_now());
        assert_eq!(user.id(), UserId::new(4));
        assert_eq!(user.username(), "lifter");
        assert_eq!(user.created_at(), fixed_now());
    }
}
