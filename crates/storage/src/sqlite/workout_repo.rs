use chrono::{DateTime, Utc};
use fitness_core::model::{NewWorkout, UserId, Workout, WorkoutId};

use super::SqliteRepository;
use super::mapping::{
    collect_rows, db_err, expect_row, id_to_i64, inserted_id, map_workout_row, tag_ids,
};
use crate::repository::{StorageError, WorkoutRepository};

const WORKOUT_COLUMNS: &str = "id, user_id, name, description, muscle_group_id, equipment_id, \
                               intensity_level_id, created_at";

#[async_trait::async_trait]
impl WorkoutRepository for SqliteRepository {
    async fn insert_workout(
        &self,
        workout: NewWorkout,
        created_at: DateTime<Utc>,
    ) -> Result<Workout, StorageError> {
        let [muscle_group_id, equipment_id, intensity_level_id] = tag_ids(workout.tags())?;
        let res = sqlx::query(
            r"
            INSERT INTO workouts (
                user_id, name, description,
                muscle_group_id, equipment_id, intensity_level_id,
                created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(id_to_i64("user_id", workout.user_id().value())?)
        .bind(workout.name())
        .bind(workout.description())
        .bind(muscle_group_id)
        .bind(equipment_id)
        .bind(intensity_level_id)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = WorkoutId::new(inserted_id(&res)?);
        Ok(workout.assign_id(id, created_at))
    }

    async fn get_workout(&self, id: WorkoutId) -> Result<Option<Workout>, StorageError> {
        let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_to_i64("workout_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(map_workout_row).transpose()
    }

    async fn list_workouts(&self, limit: u32) -> Result<Vec<Workout>, StorageError> {
        let sql = format!("SELECT {WORKOUT_COLUMNS} FROM workouts ORDER BY id ASC LIMIT ?1");
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        collect_rows(rows, map_workout_row)
    }

    async fn list_workouts_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Workout>, StorageError> {
        let sql =
            format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = ?1 ORDER BY id ASC");
        let rows = sqlx::query(&sql)
            .bind(id_to_i64("user_id", user_id.value())?)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        collect_rows(rows, map_workout_row)
    }

    async fn update_workout(&self, workout: &Workout) -> Result<(), StorageError> {
        let [muscle_group_id, equipment_id, intensity_level_id] = tag_ids(workout.tags())?;
        let res = sqlx::query(
            r"
            UPDATE workouts
            SET user_id = ?2, name = ?3, description = ?4,
                muscle_group_id = ?5, equipment_id = ?6, intensity_level_id = ?7
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("workout_id", workout.id().value())?)
        .bind(id_to_i64("user_id", workout.user_id().value())?)
        .bind(workout.name())
        .bind(workout.description())
        .bind(muscle_group_id)
        .bind(equipment_id)
        .bind(intensity_level_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_workout(&self, id: WorkoutId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM workouts WHERE id = ?1")
            .bind(id_to_i64("workout_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }
}
