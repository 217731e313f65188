use std::sync::Arc;

use fitness_core::model::{NewUser, User, UserId};
use serde::Deserialize;
use storage::repository::UserRepository;
use tracing::info;

use crate::Clock;
use crate::error::{UserServiceError, or_not_found};

/// Fields a caller may change on an existing user. `None` keeps the stored
/// value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Orchestrates user registration and profile edits.
#[derive(Clone)]
pub struct UserService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::User` for validation failures.
    /// Returns `UserServiceError::Storage` if the email is taken or persistence fails.
    pub async fn create_user(
        &self,
        username: String,
        email: String,
    ) -> Result<User, UserServiceError> {
        let new_user = NewUser::new(username, email)?;
        let user = self.users.insert_user(new_user, self.clock.now()).await?;
        info!(user_id = %user.id(), "created user");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if the user does not exist.
    pub async fn get_user(&self, id: UserId) -> Result<User, UserServiceError> {
        self.users
            .get_user(id)
            .await?
            .ok_or(UserServiceError::NotFound(id))
    }

    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` if repository access fails.
    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, UserServiceError> {
        Ok(self.users.list_users(limit).await?)
    }

    /// Apply `patch` to a stored user and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if the user does not exist.
    /// Returns `UserServiceError::User` if the patched values do not validate.
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserServiceError> {
        let current = self.get_user(id).await?;
        let username = patch
            .username
            .unwrap_or_else(|| current.username().to_owned());
        let email = patch.email.unwrap_or_else(|| current.email().to_owned());

        let updated = NewUser::new(username, email)?.assign_id(id, current.created_at());
        self.users
            .update_user(&updated)
            .await
            .map_err(or_not_found(UserServiceError::NotFound(id)))?;
        Ok(updated)
    }

    /// Delete a user together with everything they own.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::NotFound` if the user does not exist.
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserServiceError> {
        self.users
            .delete_user(id)
            .await
            .map_err(or_not_found(UserServiceError::NotFound(id)))?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::UserError;
    use fitness_core::time::{fixed_clock, fixed_now};
    use storage::memory::InMemoryRepository;

    fn service() -> UserService {
        UserService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn create_stamps_clock_time() {
        let service = service();
        let user = service
            .create_user("  dana ".into(), "dana@gym.io".into())
            .await
            .unwrap();
        assert_eq!(user.username(), "dana");
        assert_eq!(user.created_at(), fixed_now());
    }

    #[tokio::test]
    async fn create_rejects_invalid_email() {
        let err = service()
            .create_user("dana".into(), "nope".into())
            .await
            .unwrap_err();
        assert!(matches!(err, UserServiceError::User(UserError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn patch_keeps_untouched_fields() {
        let service = service();
        let user = service
            .create_user("dana".into(), "dana@gym.io".into())
            .await
            .unwrap();

        let patch = UserPatch {
            username: Some("dee".into()),
            email: None,
        };
        let updated = service.update_user(user.id(), patch).await.unwrap();
        assert_eq!(updated.username(), "dee");
        assert_eq!(updated.email(), "dana@gym.io");
        assert_eq!(service.get_user(user.id()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let service = service();
        let id = UserId::new(404);
        assert!(matches!(
            service.get_user(id).await,
            Err(UserServiceError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(
            service.delete_user(id).await,
            Err(UserServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.update_user(id, UserPatch::default()).await,
            Err(UserServiceError::NotFound(_))
        ));
    }
}
