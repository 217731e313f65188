use chrono::{DateTime, Utc};
use fitness_core::model::{NewProgressEntry, ProgressEntry, ProgressId, WorkoutId};

use super::SqliteRepository;
use super::mapping::{collect_rows, db_err, expect_row, id_to_i64, inserted_id, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn insert_progress(
        &self,
        entry: NewProgressEntry,
        recorded_at: DateTime<Utc>,
    ) -> Result<ProgressEntry, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO progress (
                workout_id, reps, sets, weight_lifted, duration_minutes, recorded_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(id_to_i64("workout_id", entry.workout_id().value())?)
        .bind(i64::from(entry.reps()))
        .bind(i64::from(entry.sets()))
        .bind(entry.weight_lifted())
        .bind(i64::from(entry.duration_minutes()))
        .bind(recorded_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = ProgressId::new(inserted_id(&res)?);
        Ok(entry.assign_id(id, recorded_at))
    }

    async fn get_progress(&self, id: ProgressId) -> Result<Option<ProgressEntry>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, workout_id, reps, sets, weight_lifted, duration_minutes, recorded_at
            FROM progress WHERE id = ?1
            ",
        )
        .bind(id_to_i64("progress_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn list_progress_for_workout(
        &self,
        workout_id: WorkoutId,
    ) -> Result<Vec<ProgressEntry>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, workout_id, reps, sets, weight_lifted, duration_minutes, recorded_at
            FROM progress
            WHERE workout_id = ?1
            ORDER BY recorded_at ASC, id ASC
            ",
        )
        .bind(id_to_i64("workout_id", workout_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_progress_row)
    }

    async fn delete_progress(&self, id: ProgressId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM progress WHERE id = ?1")
            .bind(id_to_i64("progress_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }
}
