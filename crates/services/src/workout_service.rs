use std::sync::Arc;

use fitness_core::model::{NewWorkout, UserId, Workout, WorkoutId, WorkoutTags};
use serde::Deserialize;
use storage::repository::WorkoutRepository;
use tracing::info;

use crate::Clock;
use crate::error::{WorkoutServiceError, or_not_found};

/// Fields a caller may change on an existing workout. When `tags` is present
/// it replaces all three catalog references at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<WorkoutTags>,
}

/// Orchestrates workout creation and edits.
#[derive(Clone)]
pub struct WorkoutService {
    clock: Clock,
    workouts: Arc<dyn WorkoutRepository>,
}

impl WorkoutService {
    #[must_use]
    pub fn new(clock: Clock, workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { clock, workouts }
    }

    /// Create a workout owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Workout` for validation failures.
    /// Returns `WorkoutServiceError::Storage` if the owner or a tagged catalog
    /// entry does not exist.
    pub async fn create_workout(
        &self,
        user_id: UserId,
        name: String,
        description: Option<String>,
        tags: WorkoutTags,
    ) -> Result<Workout, WorkoutServiceError> {
        let new_workout = NewWorkout::new(user_id, name, description, tags)?;
        let workout = self
            .workouts
            .insert_workout(new_workout, self.clock.now())
            .await?;
        info!(workout_id = %workout.id(), user_id = %user_id, "created workout");
        Ok(workout)
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::NotFound` if the workout does not exist.
    pub async fn get_workout(&self, id: WorkoutId) -> Result<Workout, WorkoutServiceError> {
        self.workouts
            .get_workout(id)
            .await?
            .ok_or(WorkoutServiceError::NotFound(id))
    }

    /// List workouts, optionally restricted to one owner.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::Storage` if repository access fails.
    pub async fn list_workouts(
        &self,
        owner: Option<UserId>,
        limit: u32,
    ) -> Result<Vec<Workout>, WorkoutServiceError> {
        let workouts = match owner {
            Some(user_id) => self.workouts.list_workouts_for_user(user_id).await?,
            None => self.workouts.list_workouts(limit).await?,
        };
        Ok(workouts)
    }

    /// # Errors
    ///
    /// Returns `WorkoutServiceError::NotFound` if the workout does not exist.
    /// Returns `WorkoutServiceError::Workout` if the patched values do not validate.
    pub async fn update_workout(
        &self,
        id: WorkoutId,
        patch: WorkoutPatch,
    ) -> Result<Workout, WorkoutServiceError> {
        let current = self.get_workout(id).await?;
        let name = patch.name.unwrap_or_else(|| current.name().to_owned());
        let description = match patch.description {
            Some(description) => Some(description),
            None => current.description().map(str::to_owned),
        };
        let tags = patch.tags.unwrap_or(current.tags());

        let updated = NewWorkout::new(current.user_id(), name, description, tags)?
            .assign_id(id, current.created_at());
        self.workouts
            .update_workout(&updated)
            .await
            .map_err(or_not_found(WorkoutServiceError::NotFound(id)))?;
        Ok(updated)
    }

    /// Delete a workout and its recorded progress.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutServiceError::NotFound` if the workout does not exist.
    pub async fn delete_workout(&self, id: WorkoutId) -> Result<(), WorkoutServiceError> {
        self.workouts
            .delete_workout(id)
            .await
            .map_err(or_not_found(WorkoutServiceError::NotFound(id)))?;
        info!(workout_id = %id, "deleted workout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::{NewMuscleGroup, NewUser, WorkoutError};
    use fitness_core::time::{fixed_clock, fixed_now};
    use storage::repository::{Storage, StorageError};

    #[tokio::test]
    async fn patch_replaces_tags_and_keeps_name() {
        let storage = Storage::in_memory();
        let user = storage
            .users
            .insert_user(NewUser::new("fin", "fin@gym.io").unwrap(), fixed_now())
            .await
            .unwrap();
        let legs = storage
            .catalog
            .insert_muscle_group(NewMuscleGroup::new("Legs", None).unwrap())
            .await
            .unwrap();
        let service = WorkoutService::new(fixed_clock(), Arc::clone(&storage.workouts));

        let workout = service
            .create_workout(user.id(), "Lunges".into(), None, WorkoutTags::default())
            .await
            .unwrap();
        let tags = WorkoutTags {
            muscle_group_id: Some(legs.id()),
            ..WorkoutTags::default()
        };
        let updated = service
            .update_workout(
                workout.id(),
                WorkoutPatch {
                    tags: Some(tags),
                    ..WorkoutPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Lunges");
        assert_eq!(updated.tags(), tags);
        assert_eq!(service.get_workout(workout.id()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn unknown_tag_conflicts() {
        let storage = Storage::in_memory();
        let user = storage
            .users
            .insert_user(NewUser::new("fin", "fin@gym.io").unwrap(), fixed_now())
            .await
            .unwrap();
        let service = WorkoutService::new(fixed_clock(), Arc::clone(&storage.workouts));

        let tags = WorkoutTags {
            equipment_id: Some(fitness_core::model::EquipmentId::new(77)),
            ..WorkoutTags::default()
        };
        let err = service
            .create_workout(user.id(), "Press".into(), None, tags)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkoutServiceError::Storage(StorageError::Conflict(_))));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let service = WorkoutService::new(fixed_clock(), Storage::in_memory().workouts);
        let err = service
            .create_workout(UserId::new(1), " ".into(), None, WorkoutTags::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkoutServiceError::Workout(WorkoutError::EmptyName)));
    }
}
