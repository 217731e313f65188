use std::sync::Arc;

use fitness_core::model::{Goal, GoalId, NewGoal, UserId};
use serde::Deserialize;
use storage::repository::GoalRepository;
use tracing::info;

use crate::Clock;
use crate::error::{GoalServiceError, or_not_found};

/// Fields a caller may change on an existing goal. `None` keeps the stored
/// value; an empty description clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target: Option<f64>,
}

/// Orchestrates goal creation and edits. Evaluation lives in
/// `ProgressService`.
#[derive(Clone)]
pub struct GoalService {
    clock: Clock,
    goals: Arc<dyn GoalRepository>,
}

impl GoalService {
    #[must_use]
    pub fn new(clock: Clock, goals: Arc<dyn GoalRepository>) -> Self {
        Self { clock, goals }
    }

    /// Create a goal for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `GoalServiceError::Goal` for validation failures.
    /// Returns `GoalServiceError::Storage` if the user does not exist or persistence fails.
    pub async fn create_goal(
        &self,
        user_id: UserId,
        name: String,
        description: Option<String>,
        target: f64,
    ) -> Result<Goal, GoalServiceError> {
        let new_goal = NewGoal::new(user_id, name, description, target)?;
        let goal = self.goals.insert_goal(new_goal, self.clock.now()).await?;
        info!(goal_id = %goal.id(), user_id = %user_id, goal_target = target, "created goal");
        Ok(goal)
    }

    /// # Errors
    ///
    /// Returns `GoalServiceError::NotFound` if the goal does not exist.
    pub async fn get_goal(&self, id: GoalId) -> Result<Goal, GoalServiceError> {
        self.goals
            .get_goal(id)
            .await?
            .ok_or(GoalServiceError::NotFound(id))
    }

    /// List goals, optionally restricted to one owner.
    ///
    /// # Errors
    ///
    /// Returns `GoalServiceError::Storage` if repository access fails.
    pub async fn list_goals(
        &self,
        owner: Option<UserId>,
        limit: u32,
    ) -> Result<Vec<Goal>, GoalServiceError> {
        let goals = match owner {
            Some(user_id) => self.goals.list_goals_for_user(user_id).await?,
            None => self.goals.list_goals(limit).await?,
        };
        Ok(goals)
    }

    /// # Errors
    ///
    /// Returns `GoalServiceError::NotFound` if the goal does not exist.
    /// Returns `GoalServiceError::Goal` if the patched values do not validate.
    pub async fn update_goal(&self, id: GoalId, patch: GoalPatch) -> Result<Goal, GoalServiceError> {
        let current = self.get_goal(id).await?;
        let name = patch.name.unwrap_or_else(|| current.name().to_owned());
        let description = match patch.description {
            Some(description) => Some(description),
            None => current.description().map(str::to_owned),
        };
        let target = patch.target.unwrap_or(current.target());

        let updated = NewGoal::new(current.user_id(), name, description, target)?
            .assign_id(id, current.created_at());
        self.goals
            .update_goal(&updated)
            .await
            .map_err(or_not_found(GoalServiceError::NotFound(id)))?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `GoalServiceError::NotFound` if the goal does not exist.
    pub async fn delete_goal(&self, id: GoalId) -> Result<(), GoalServiceError> {
        self.goals
            .delete_goal(id)
            .await
            .map_err(or_not_found(GoalServiceError::NotFound(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use fitness_core::model::{GoalError, NewUser};
    use fitness_core::time::fixed_clock;
    use storage::repository::{Storage, StorageError};

    async fn setup() -> (GoalService, UserId) {
        let storage = Storage::in_memory();
        let user = storage
            .users
            .insert_user(NewUser::new("eve", "eve@gym.io").unwrap(), fixed_clock().now())
            .await
            .unwrap();
        (GoalService::new(fixed_clock(), storage.goals), user.id())
    }

    #[tokio::test]
    async fn create_and_list_by_owner() {
        let (service, user_id) = setup().await;
        let goal = service
            .create_goal(user_id, "Bench 100".into(), None, 100.0)
            .await
            .unwrap();

        assert_eq!(service.list_goals(Some(user_id), 10).await.unwrap(), vec![goal.clone()]);
        assert!(service
            .list_goals(Some(UserId::new(999)), 10)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(service.list_goals(None, 10).await.unwrap(), vec![goal]);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_target() {
        let (service, user_id) = setup().await;
        let err = service
            .create_goal(user_id, "Nothing".into(), None, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GoalServiceError::Goal(GoalError::InvalidTarget(_))));
    }

    #[tokio::test]
    async fn create_for_missing_user_conflicts() {
        let (service, _) = setup().await;
        let err = service
            .create_goal(UserId::new(999), "Ghost".into(), None, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GoalServiceError::Storage(StorageError::Conflict(_))));
    }

    #[tokio::test]
    async fn patch_clears_description_and_keeps_target() {
        let (service, user_id) = setup().await;
        let goal = service
            .create_goal(user_id, "Rows".into(), Some("back day".into()), 40.0)
            .await
            .unwrap();

        let patch = GoalPatch {
            name: None,
            description: Some("   ".into()),
            target: None,
        };
        let updated = service.update_goal(goal.id(), patch).await.unwrap();
        assert_eq!(updated.name(), "Rows");
        assert_eq!(updated.description(), None);
        assert!((updated.target() - 40.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn delete_missing_goal_is_not_found() {
        let (service, _) = setup().await;
        assert!(matches!(
            service.delete_goal(GoalId::new(5)).await,
            Err(GoalServiceError::NotFound(_))
        ));
    }
}
