use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::goal_service::GoalService;
use crate::progress_service::ProgressService;
use crate::user_service::UserService;
use crate::workout_service::WorkoutService;

/// Assembles the services the HTTP layer calls into.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<UserService>,
    goals: Arc<GoalService>,
    catalog: Arc<CatalogService>,
    workouts: Arc<WorkoutService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services over an already-constructed storage bundle.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let users = Arc::new(UserService::new(clock, Arc::clone(&storage.users)));
        let goals = Arc::new(GoalService::new(clock, Arc::clone(&storage.goals)));
        let catalog = Arc::new(CatalogService::new(Arc::clone(&storage.catalog)));
        let workouts = Arc::new(WorkoutService::new(clock, Arc::clone(&storage.workouts)));
        let progress = Arc::new(ProgressService::new(
            clock,
            Arc::clone(&storage.progress),
            Arc::clone(&storage.workouts),
            Arc::clone(&storage.goals),
        ));

        Self {
            users,
            goals,
            catalog,
            workouts,
            progress,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or migrations fail.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!("sqlite storage ready");
        Ok(Self::from_storage(&storage, clock))
    }

    /// Build services backed by in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    #[must_use]
    pub fn users(&self) -> Arc<UserService> {
        Arc::clone(&self.users)
    }

    #[must_use]
    pub fn goals(&self) -> Arc<GoalService> {
        Arc::clone(&self.goals)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn workouts(&self) -> Arc<WorkoutService> {
        Arc::clone(&self.workouts)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
