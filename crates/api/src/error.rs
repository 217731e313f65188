use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fitness_core::evaluator::EvaluationError;
use serde_json::json;
use services::{
    CatalogServiceError, GoalServiceError, ProgressServiceError, UserServiceError,
    WorkoutServiceError,
};
use storage::repository::StorageError;
use thiserror::Error;
use tracing::{debug, error};

/// Every failure a handler can return. Each variant owns one status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("missing X-User-Id header")]
    MissingUser,

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::MissingUser => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if let Self::Internal(detail) = &self {
            error!(%detail, "request failed");
            "internal error".to_owned()
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl ApiError {
    /// Keeps axum's message; a 422 stays a validation error, everything else is a bad request.
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            Self::Validation(message)
        } else {
            Self::BadRequest(message)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound(err.to_string()),
            StorageError::Conflict(_) => Self::Conflict(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<EvaluationError> for ApiError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::Unauthorized { .. } => Self::Forbidden(err.to_string()),
            EvaluationError::DivisionByZero => Self::Validation(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            UserServiceError::User(inner) => Self::Validation(inner.to_string()),
            UserServiceError::Storage(inner) => inner.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<GoalServiceError> for ApiError {
    fn from(err: GoalServiceError) -> Self {
        match err {
            GoalServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            GoalServiceError::Goal(inner) => Self::Validation(inner.to_string()),
            GoalServiceError::Storage(inner) => inner.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<CatalogServiceError> for ApiError {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::MuscleGroupNotFound(_)
            | CatalogServiceError::EquipmentNotFound(_)
            | CatalogServiceError::IntensityLevelNotFound(_) => Self::NotFound(err.to_string()),
            CatalogServiceError::Catalog(inner) => Self::Validation(inner.to_string()),
            CatalogServiceError::Storage(inner) => inner.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<WorkoutServiceError> for ApiError {
    fn from(err: WorkoutServiceError) -> Self {
        match err {
            WorkoutServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            WorkoutServiceError::Workout(inner) => Self::Validation(inner.to_string()),
            WorkoutServiceError::Storage(inner) => inner.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ProgressServiceError> for ApiError {
    fn from(err: ProgressServiceError) -> Self {
        match err {
            ProgressServiceError::WorkoutNotFound(_)
            | ProgressServiceError::GoalNotFound(_)
            | ProgressServiceError::EntryNotFound(_) => Self::NotFound(err.to_string()),
            ProgressServiceError::ForeignWorkout { .. } => Self::Forbidden(err.to_string()),
            ProgressServiceError::Progress(inner) => Self::Validation(inner.to_string()),
            ProgressServiceError::Evaluation(inner) => inner.into(),
            ProgressServiceError::Storage(inner) => inner.into(),
            other => Self::Internal(other.to_string()),
        }
    }
}
