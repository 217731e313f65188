use chrono::{DateTime, Utc};
use fitness_core::model::{NewUser, User, UserId};

use super::SqliteRepository;
use super::mapping::{collect_rows, db_err, expect_row, id_to_i64, inserted_id, map_user_row};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(
        &self,
        user: NewUser,
        created_at: DateTime<Utc>,
    ) -> Result<User, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (username, email, created_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(user.username())
        .bind(user.email())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = UserId::new(inserted_id(&res)?);
        Ok(user.assign_id(id, created_at))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, username, email, created_at
            FROM users WHERE id = ?1
            ",
        )
        .bind(id_to_i64("user_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, username, email, created_at
            FROM users
            ORDER BY id ASC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        collect_rows(rows, map_user_row)
    }

    async fn update_user(&self, user: &User) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
            UPDATE users
            SET username = ?2, email = ?3
            WHERE id = ?1
            ",
        )
        .bind(id_to_i64("user_id", user.id().value())?)
        .bind(user.username())
        .bind(user.email())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        expect_row(&res)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id_to_i64("user_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        expect_row(&res)
    }
}
