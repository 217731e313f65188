//! Shared error types for the services crate.

use thiserror::Error;

use fitness_core::evaluator::EvaluationError;
use fitness_core::model::{
    CatalogError, EquipmentId, GoalError, GoalId, IntensityLevelId, MuscleGroupId, ProgressError,
    ProgressId, UserError, UserId, WorkoutError, WorkoutId,
};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `UserService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `GoalService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GoalServiceError {
    #[error("goal {0} not found")]
    NotFound(GoalId),
    #[error(transparent)]
    Goal(#[from] GoalError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("muscle group {0} not found")]
    MuscleGroupNotFound(MuscleGroupId),
    #[error("equipment {0} not found")]
    EquipmentNotFound(EquipmentId),
    #[error("intensity level {0} not found")]
    IntensityLevelNotFound(IntensityLevelId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `WorkoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkoutServiceError {
    #[error("workout {0} not found")]
    NotFound(WorkoutId),
    #[error(transparent)]
    Workout(#[from] WorkoutError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("workout {0} not found")]
    WorkoutNotFound(WorkoutId),
    #[error("goal {0} not found")]
    GoalNotFound(GoalId),
    #[error("progress entry {0} not found")]
    EntryNotFound(ProgressId),
    #[error("workout {workout} does not belong to the owner of goal {goal}")]
    ForeignWorkout { goal: GoalId, workout: WorkoutId },
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}

/// Turns `StorageError::NotFound` into the caller's own not-found variant and
/// passes every other storage failure through.
pub(crate) fn or_not_found<E: From<StorageError>>(not_found: E) -> impl FnOnce(StorageError) -> E {
    move |err| match err {
        StorageError::NotFound => not_found,
        other => E::from(other),
    }
}
