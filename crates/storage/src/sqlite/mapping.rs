use chrono::{DateTime, Utc};
use fitness_core::model::{
    Equipment, EquipmentId, Goal, GoalId, IntensityLevel, IntensityLevelId, MuscleGroup,
    MuscleGroupId, ProgressEntry, ProgressId, User, UserId, Workout, WorkoutId, WorkoutTags,
};
use sqlx::Row;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps a sqlx failure onto `StorageError`, turning constraint violations into
/// `Conflict` so callers can tell them apart from I/O problems.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_unique_violation() => {
            StorageError::Conflict(db.message().to_owned())
        }
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn opt_id<T>(
    row: &SqliteRow,
    column: &'static str,
    build: fn(u64) -> T,
) -> Result<Option<T>, StorageError> {
    row.try_get::<Option<i64>, _>(column)
        .map_err(ser)?
        .map(|v| i64_to_u64(column, v).map(build))
        .transpose()
}

fn req_id<T>(row: &SqliteRow, column: &'static str, build: fn(u64) -> T) -> Result<T, StorageError> {
    let raw: i64 = row.try_get(column).map_err(ser)?;
    Ok(build(i64_to_u64(column, raw)?))
}

pub(crate) fn tag_ids(tags: WorkoutTags) -> Result<[Option<i64>; 3], StorageError> {
    Ok([
        tags.muscle_group_id
            .map(|id| id_to_i64("muscle_group_id", id.value()))
            .transpose()?,
        tags.equipment_id
            .map(|id| id_to_i64("equipment_id", id.value()))
            .transpose()?,
        tags.intensity_level_id
            .map(|id| id_to_i64("intensity_level_id", id.value()))
            .transpose()?,
    ])
}

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<User, StorageError> {
    User::from_persisted(
        req_id(row, "id", UserId::new)?,
        row.try_get("username").map_err(ser)?,
        row.try_get("email").map_err(ser)?,
        row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_goal_row(row: &SqliteRow) -> Result<Goal, StorageError> {
    Goal::from_persisted(
        req_id(row, "id", GoalId::new)?,
        req_id(row, "user_id", UserId::new)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
        row.try_get("target").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_muscle_group_row(row: &SqliteRow) -> Result<MuscleGroup, StorageError> {
    MuscleGroup::from_persisted(
        req_id(row, "id", MuscleGroupId::new)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_equipment_row(row: &SqliteRow) -> Result<Equipment, StorageError> {
    Equipment::from_persisted(
        req_id(row, "id", EquipmentId::new)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_intensity_level_row(row: &SqliteRow) -> Result<IntensityLevel, StorageError> {
    let level: i64 = row.try_get("level").map_err(ser)?;
    let level = u8::try_from(level)
        .map_err(|_| StorageError::Serialization(format!("invalid level: {level}")))?;
    IntensityLevel::from_persisted(
        req_id(row, "id", IntensityLevelId::new)?,
        row.try_get("name").map_err(ser)?,
        level,
    )
    .map_err(ser)
}

pub(crate) fn map_workout_row(row: &SqliteRow) -> Result<Workout, StorageError> {
    let tags = WorkoutTags {
        muscle_group_id: opt_id(row, "muscle_group_id", MuscleGroupId::new)?,
        equipment_id: opt_id(row, "equipment_id", EquipmentId::new)?,
        intensity_level_id: opt_id(row, "intensity_level_id", IntensityLevelId::new)?,
    };
    Workout::from_persisted(
        req_id(row, "id", WorkoutId::new)?,
        req_id(row, "user_id", UserId::new)?,
        row.try_get("name").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
        tags,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<ProgressEntry, StorageError> {
    ProgressEntry::from_persisted(
        req_id(row, "id", ProgressId::new)?,
        req_id(row, "workout_id", WorkoutId::new)?,
        i64_to_u32("reps", row.try_get("reps").map_err(ser)?)?,
        i64_to_u32("sets", row.try_get("sets").map_err(ser)?)?,
        row.try_get("weight_lifted").map_err(ser)?,
        i64_to_u32("duration_minutes", row.try_get("duration_minutes").map_err(ser)?)?,
        row.try_get("recorded_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn collect_rows<T>(
    rows: Vec<SqliteRow>,
    map: fn(&SqliteRow) -> Result<T, StorageError>,
) -> Result<Vec<T>, StorageError> {
    rows.iter().map(map).collect()
}

pub(crate) fn inserted_id(res: &SqliteQueryResult) -> Result<u64, StorageError> {
    i64_to_u64("id", res.last_insert_rowid())
}

/// `UPDATE`/`DELETE` that touched nothing means the row was missing.
pub(crate) fn expect_row(res: &SqliteQueryResult) -> Result<(), StorageError> {
    if res.rows_affected() == 0 {
        Err(StorageError::NotFound)
    } else {
        Ok(())
    }
}
