mod catalog;
mod goal;
mod ids;
mod progress;
mod text;
mod user;
mod workout;

pub use ids::{
    EquipmentId, GoalId, IntensityLevelId, MuscleGroupId, ParseIdError, ProgressId, UserId,
    WorkoutId,
};

pub use catalog::{
    CatalogError, Equipment, IntensityLevel, MAX_INTENSITY, MIN_INTENSITY, MuscleGroup,
    NewEquipment, NewIntensityLevel, NewMuscleGroup,
};
pub use goal::{Goal, GoalError, NewGoal};
pub use progress::{NewProgressEntry, ProgressEntry, ProgressError};
pub use user::{NewUser, User, UserError};
pub use workout::{NewWorkout, Workout, WorkoutError, WorkoutTags};
