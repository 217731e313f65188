#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod goal_service;
pub mod progress_service;
pub mod user_service;
pub mod workout_service;

pub use fitness_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogEntryPatch, CatalogService, IntensityLevelPatch};
pub use error::{
    AppServicesError, CatalogServiceError, GoalServiceError, ProgressServiceError,
    UserServiceError, WorkoutServiceError,
};
pub use goal_service::{GoalPatch, GoalService};
pub use progress_service::{ProgressInput, ProgressService};
pub use user_service::{UserPatch, UserService};
pub use workout_service::{WorkoutPatch, WorkoutService};
