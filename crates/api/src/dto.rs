//! JSON request and response bodies.

use chrono::{DateTime, Utc};
use fitness_core::model::{
    Equipment, EquipmentId, Goal, GoalId, IntensityLevel, IntensityLevelId, MuscleGroup,
    MuscleGroupId, ProgressEntry, ProgressId, User, UserId, Workout, WorkoutId, WorkoutTags,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIST_LIMIT: u32 = 100;
pub const MAX_LIST_LIMIT: u32 = 1_000;

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateGoal {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub target: f64,
}

/// Body for creating a muscle group or a piece of equipment.
#[derive(Debug, Deserialize)]
pub struct CreateCatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntensityLevel {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: WorkoutTags,
}

/// `?user_id=&limit=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<UserId>,
    pub limit: Option<u32>,
}

impl ListQuery {
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
    }
}

/// `?workout_id=` on goal evaluation endpoints.
#[derive(Debug, Deserialize)]
pub struct WorkoutQuery {
    pub workout_id: WorkoutId,
}

//
// ─── RESPONSES ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_owned(),
            email: user.email().to_owned(),
            created_at: user.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: GoalId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub target: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Goal> for GoalResponse {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id(),
            user_id: goal.user_id(),
            name: goal.name().to_owned(),
            description: goal.description().map(str::to_owned),
            target: goal.target(),
            created_at: goal.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MuscleGroupResponse {
    pub id: MuscleGroupId,
    pub name: String,
    pub description: Option<String>,
}

impl From<&MuscleGroup> for MuscleGroupResponse {
    fn from(group: &MuscleGroup) -> Self {
        Self {
            id: group.id(),
            name: group.name().to_owned(),
            description: group.description().map(str::to_owned),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: EquipmentId,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Equipment> for EquipmentResponse {
    fn from(equipment: &Equipment) -> Self {
        Self {
            id: equipment.id(),
            name: equipment.name().to_owned(),
            description: equipment.description().map(str::to_owned),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IntensityLevelResponse {
    pub id: IntensityLevelId,
    pub name: String,
    pub level: u8,
}

impl From<&IntensityLevel> for IntensityLevelResponse {
    fn from(level: &IntensityLevel) -> Self {
        Self {
            id: level.id(),
            name: level.name().to_owned(),
            level: level.level(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkoutResponse {
    pub id: WorkoutId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub tags: WorkoutTags,
    pub created_at: DateTime<Utc>,
}

impl From<&Workout> for WorkoutResponse {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id(),
            user_id: workout.user_id(),
            name: workout.name().to_owned(),
            description: workout.description().map(str::to_owned),
            tags: workout.tags(),
            created_at: workout.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub id: ProgressId,
    pub workout_id: WorkoutId,
    pub reps: u32,
    pub sets: u32,
    pub weight_lifted: f64,
    pub duration_minutes: u32,
    pub recorded_at: DateTime<Utc>,
}

impl From<&ProgressEntry> for ProgressResponse {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            id: entry.id(),
            workout_id: entry.workout_id(),
            reps: entry.reps(),
            sets: entry.sets(),
            weight_lifted: entry.weight_lifted(),
            duration_minutes: entry.duration_minutes(),
            recorded_at: entry.recorded_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub workout_id: WorkoutId,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct GoalProgressResponse {
    pub goal_id: GoalId,
    pub workout_id: WorkoutId,
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct GoalAchievedResponse {
    pub goal_id: GoalId,
    pub workout_id: WorkoutId,
    pub achieved: bool,
}

/// Converts a slice of records into their response bodies.
pub fn to_responses<'a, T: 'a, R: From<&'a T>>(items: &'a [T]) -> Vec<R> {
    items.iter().map(R::from).collect()
}
