use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{GoalId, UserId};
use crate::model::text;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum GoalError {
    #[error("goal name cannot be empty")]
    EmptyName,

    #[error("goal target must be a positive number, got {0}")]
    InvalidTarget(f64),
}

//
// ─── NEW GOAL ──────────────────────────────────────────────────────────────────
//

/// Validated input for creating a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    user_id: UserId,
    name: String,
    description: Option<String>,
    target: f64,
}

impl NewGoal {
    /// Validates a goal before it is stored.
    ///
    /// A zero target is rejected here; it would make percentage progress
    /// undefined later on.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyName` for a blank name, or
    /// `GoalError::InvalidTarget` when `target` is not finite and positive.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        target: f64,
    ) -> Result<Self, GoalError> {
        let name = text::required(name).ok_or(GoalError::EmptyName)?;
        if !target.is_finite() || target <= 0.0 {
            return Err(GoalError::InvalidTarget(target));
        }

        Ok(Self {
            user_id,
            name,
            description: text::optional(description),
            target,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn assign_id(self, id: GoalId, created_at: DateTime<Utc>) -> Goal {
        Goal {
            id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            target: self.target,
            created_at,
        }
    }
}

//
// ─── GOAL ──────────────────────────────────────────────────────────────────────
//

/// A target metric a user wants to reach.
///
/// `target` is compared against the cumulative `reps * sets` of a workout's
/// progress entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    id: GoalId,
    user_id: UserId,
    name: String,
    description: Option<String>,
    target: f64,
    created_at: DateTime<Utc>,
}

impl Goal {
    /// Rebuilds a goal loaded from storage.
    ///
    /// The target is taken as stored, including values that `NewGoal` would
    /// reject, so the evaluator can report them instead of the loader.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::EmptyName` if the stored name is blank.
    pub fn from_persisted(
        id: GoalId,
        user_id: UserId,
        name: String,
        description: Option<String>,
        target: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, GoalError> {
        let name = text::required(name).ok_or(GoalError::EmptyName)?;
        Ok(Self {
            id,
            user_id,
            name,
            description: text::optional(description),
            target,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> GoalId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
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
    fn new_goal_happy_path() {
        let goal = NewGoal::new(
            UserId::new(1),
            " Get Fit ",
            Some(" Achieve overall fitness ".into()),
            20.0,
        )
        .unwrap()
        .assign_id(GoalId::new(3), fixed_now());

        assert_eq!(goal.id(), GoalId::new(3));
        assert_eq!(goal.name(), "Get Fit");
        assert_eq!(goal.description(), Some("Achieve overall fitness"));
        assert!((goal.target() - 20.0).abs() < f64::EPSILON);
        assert!(goal.is_owned_by(UserId::new(1)));
        assert!(!goal.is_owned_by(UserId::new(2)));
    }

    #[test]
    fn rejects_blank_name() {
        let err = NewGoal::new(UserId::new(1), "  ", None, 10.0).unwrap_err();
        assert_eq!(err, GoalError::EmptyName);
    }

    #[test]
    fn rejects_non_positive_targets() {
        for target in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = NewGoal::new(UserId::new(1), "Squat", None, target).unwrap_err();
            assert!(matches!(err, GoalError::InvalidTarget(_)));
        }
    }

    #[test]
    fn from_persisted_keeps_zero_target() {
        let goal = Goal::from_persisted(
            GoalId::new(1),
            UserId::new(1),
            "Legacy".into(),
            None,
            0.0,
            fixed_now(),
        )
        .unwrap();
        assert!(goal.target().abs() < f64::EPSILON);
    }
}
