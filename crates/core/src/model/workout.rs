use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{EquipmentId, IntensityLevelId, MuscleGroupId, UserId, WorkoutId};
use crate::model::text;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutError {
    #[error("workout name cannot be empty")]
    EmptyName,
}

/// Optional catalog references attached to a workout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutTags {
    pub muscle_group_id: Option<MuscleGroupId>,
    pub equipment_id: Option<EquipmentId>,
    pub intensity_level_id: Option<IntensityLevelId>,
}

/// Validated input for creating a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    user_id: UserId,
    name: String,
    description: Option<String>,
    tags: WorkoutTags,
}

impl NewWorkout {
    /// # Errors
    ///
    /// Returns `WorkoutError::EmptyName` if the name is blank.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        tags: WorkoutTags,
    ) -> Result<Self, WorkoutError> {
        Ok(Self {
            user_id,
            name: text::required(name).ok_or(WorkoutError::EmptyName)?,
            description: text::optional(description),
            tags,
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
    pub fn tags(&self) -> WorkoutTags {
        self.tags
    }

    #[must_use]
    pub fn assign_id(self, id: WorkoutId, created_at: DateTime<Utc>) -> Workout {
        Workout {
            id,
            user_id: self.user_id,
            name: self.name,
            description: self.description,
            tags: self.tags,
            created_at,
        }
    }
}

/// A named exercise a user performs, e.g. "Bench press".
///
/// Completed instances are recorded separately as progress entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    id: WorkoutId,
    user_id: UserId,
    name: String,
    description: Option<String>,
    tags: WorkoutTags,
    created_at: DateTime<Utc>,
}

impl Workout {
    /// # Errors
    ///
    /// Returns `WorkoutError::EmptyName` if the stored name is blank.
    pub fn from_persisted(
        id: WorkoutId,
        user_id: UserId,
        name: String,
        description: Option<String>,
        tags: WorkoutTags,
        created_at: DateTime<Utc>,
    ) -> Result<Self, WorkoutError> {
        Ok(NewWorkout::new(user_id, name, description, tags)?.assign_id(id, created_at))
    }

    #[must_use]
    pub fn id(&self) -> WorkoutId {
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
    pub fn tags(&self) -> WorkoutTags {
        self.tags
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the same workout pointing at a different set of catalog entries.
    #[must_use]
    pub fn with_tags(mut self, tags: WorkoutTags) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn new_workout_trims_name() {
        let workout = NewWorkout::new(UserId::new(1), "  Bench ", None, WorkoutTags::default())
            .unwrap()
            .assign_id(WorkoutId::new(2), fixed_now());
        assert_eq!(workout.name(), "Bench");
        assert_eq!(workout.user_id(), UserId::new(1));
        assert_eq!(workout.tags(), WorkoutTags::default());
    }

    #[test]
    fn rejects_blank_name() {
        let err = NewWorkout::new(UserId::new(1), "", None, WorkoutTags::default()).unwrap_err();
        assert_eq!(err, WorkoutError::EmptyName);
    }
}
