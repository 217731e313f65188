use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fitness_core::model::{
    Equipment, EquipmentId, Goal, GoalId, IntensityLevel, IntensityLevelId, MuscleGroup,
    MuscleGroupId, NewEquipment, NewGoal, NewIntensityLevel, NewMuscleGroup, NewProgressEntry,
    NewUser, NewWorkout, ProgressEntry, ProgressId, User, UserId, Workout, WorkoutId,
};
use thiserror::Error;

use crate::memory::InMemoryRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    /// A referenced parent row is missing or a uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_user(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, StorageError>;

    /// Fetch a user by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// List users ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist, or
    /// `StorageError::Conflict` if the new email belongs to someone else.
    async fn update_user(&self, user: &User) -> Result<(), StorageError>;

    /// Delete a user together with their goals, workouts and progress.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn delete_user(&self, id: UserId) -> Result<(), StorageError>;
}

//
// ─── GOALS ─────────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the owning user does not exist.
    async fn insert_goal(
        &self,
        goal: NewGoal,
        created_at: DateTime<Utc>,
    ) -> Result<Goal, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_goals(&self, limit: u32) -> Result<Vec<Goal>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_goals_for_user(&self, user_id: UserId) -> Result<Vec<Goal>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the goal does not exist.
    async fn update_goal(&self, goal: &Goal) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the goal does not exist.
    async fn delete_goal(&self, id: GoalId) -> Result<(), StorageError>;
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Muscle groups, equipment and intensity levels.
///
/// Deleting any of them clears the matching reference on workouts instead of
/// deleting the workouts.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_muscle_group(&self, group: NewMuscleGroup)
    -> Result<MuscleGroup, StorageError>;
    async fn get_muscle_group(&self, id: MuscleGroupId)
    -> Result<Option<MuscleGroup>, StorageError>;
    async fn list_muscle_groups(&self, limit: u32) -> Result<Vec<MuscleGroup>, StorageError>;
    async fn update_muscle_group(&self, group: &MuscleGroup) -> Result<(), StorageError>;
    async fn delete_muscle_group(&self, id: MuscleGroupId) -> Result<(), StorageError>;

    async fn insert_equipment(&self, equipment: NewEquipment) -> Result<Equipment, StorageError>;
    async fn get_equipment(&self, id: EquipmentId) -> Result<Option<Equipment>, StorageError>;
    async fn list_equipment(&self, limit: u32) -> Result<Vec<Equipment>, StorageError>;
    async fn update_equipment(&self, equipment: &Equipment) -> Result<(), StorageError>;
    async fn delete_equipment(&self, id: EquipmentId) -> Result<(), StorageError>;

    async fn insert_intensity_level(
        &self,
        level: NewIntensityLevel,
    ) -> Result<IntensityLevel, StorageError>;
    async fn get_intensity_level(
        &self,
        id: IntensityLevelId,
    ) -> Result<Option<IntensityLevel>, StorageError>;
    async fn list_intensity_levels(&self, limit: u32)
    -> Result<Vec<IntensityLevel>, StorageError>;
    async fn update_intensity_level(&self, level: &IntensityLevel) -> Result<(), StorageError>;
    async fn delete_intensity_level(&self, id: IntensityLevelId) -> Result<(), StorageError>;
}

//
// ─── WORKOUTS ──────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the owner or a tagged catalog entry
    /// does not exist.
    async fn insert_workout(
        &self,
        workout: NewWorkout,
        created_at: DateTime<Utc>,
    ) -> Result<Workout, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_workouts(&self, limit: u32) -> Result<Vec<Workout>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_workouts_for_user(&self, user_id: UserId)
    -> Result<Vec<Workout>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the workout does not exist, or
    /// `StorageError::Conflict` if a tagged catalog entry does not exist.
    async fn update_workout(&self, workout: &Workout) -> Result<(), StorageError>;

    /// Delete a workout and its progress entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the workout does not exist.
    async fn delete_workout(&self, id: WorkoutId) -> Result<(), StorageError>;
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the workout does not exist.
    async fn insert_progress(
        &self,
        entry: NewProgressEntry,
        recorded_at: DateTime<Utc>,
    ) -> Result<ProgressEntry, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_progress(&self, id: ProgressId) -> Result<Option<ProgressEntry>, StorageError>;

    /// Entries for a workout, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_progress_for_workout(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<ProgressEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the entry does not exist.
    async fn delete_progress(&self, id: ProgressId) -> Result<(), StorageError>;
}

//
// ─── STORAGE BUNDLE ────────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub goals: Arc<dyn GoalRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            users: Arc::new(repo.clone()),
            goals: Arc::new(repo.clone()),
            catalog: Arc::new(repo.clone()),
            workouts: Arc::new(repo.clone()),
            progress: Arc::new(repo),
        }
    }
}
