use chrono::{DateTime, Utc};
use fitness_core::model::{Goal, GoalId, NewGoal, UserId};

use super::SqliteRepository;
use super::mapping::{collect_rows, db_err, expect_row, id_to_i64, inserted_id, map_goal_row};
use crate::repository::{GoalRepository, StorageError};

#[async_trait::async_trait]
impl GoalRepository for SqliteRepository {
    async fn insert_goal(
        &self,
        goal: NewGoal,
        created_at: DateTime<Utc>,
    ) -> Result<Goal, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO goals (user_id, name, description, target, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_to_i64("user_id", goal.user_id().value())?)
        .bind(goal.name())
        .bind(goal.description())
        .bind(goal.target())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = GoalId::new(inserted_id(&res)?);
        Ok(goal.assign_id(id, created_at))
    }

    async fn get_goal(&self, id: GoalId) -> Result<Option<Goal>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, description, target, created_at
            FROM goals WHERE id = ?1
            ",
        )
        .bind(id_to_i64("goal_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_goal_row).transpose()
    }

    async fn list_goals(&self, limit: u32) -> Result<Vec<Goal>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, target, created_at
            FROM goals
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_goal_row)
    }

    async fn list_goals_for_user(&self, user_id: UserId) -> Result<Vec<Goal>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, target, created_at
            FROM goals
            WHERE user_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(id_to_i64("user_id", user_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_goal_row)
    }

    async fn update_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE goals
            SET user_id = ?2, name = ?3, description = ?4, target = ?5
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("goal_id", goal.id().value())?)
        .bind(id_to_i64("user_id", goal.user_id().value())?)
        .bind(goal.name())
        .bind(goal.description())
        .bind(goal.target())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_goal(&self, id: GoalId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM goals WHERE id = ?1")
            .bind(id_to_i64("goal_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }
}
