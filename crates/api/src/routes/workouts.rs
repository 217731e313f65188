use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use fitness_core::model::{ProgressId, WorkoutId};
use services::{AppServices, ProgressInput, WorkoutPatch};

use crate::dto::{
    CreateWorkout, ListQuery, ProgressResponse, ScoreResponse, WorkoutResponse, to_responses,
};
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};

pub async fn list_workouts(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WorkoutResponse>>, ApiError> {
    let workouts = services
        .workouts()
        .list_workouts(query.user_id, query.limit())
        .await?;
    Ok(Json(to_responses(&workouts)))
}

pub async fn create_workout(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateWorkout>,
) -> Result<(StatusCode, Json<WorkoutResponse>), ApiError> {
    let workout = services
        .workouts()
        .create_workout(body.user_id, body.name, body.description, body.tags)
        .await?;
    Ok((StatusCode::CREATED, Json(WorkoutResponse::from(&workout))))
}

pub async fn get_workout(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let workout = services.workouts().get_workout(id).await?;
    Ok(Json(WorkoutResponse::from(&workout)))
}

pub async fn update_workout(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
    JsonBody(patch): JsonBody<WorkoutPatch>,
) -> Result<Json<WorkoutResponse>, ApiError> {
    let workout = services.workouts().update_workout(id, patch).await?;
    Ok(Json(WorkoutResponse::from(&workout)))
}

pub async fn delete_workout(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
) -> Result<StatusCode, ApiError> {
    services.workouts().delete_workout(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_progress(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<Vec<ProgressResponse>>, ApiError> {
    let entries = services.progress().list_progress(id).await?;
    Ok(Json(to_responses(&entries)))
}

pub async fn record_progress(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
    JsonBody(input): JsonBody<ProgressInput>,
) -> Result<(StatusCode, Json<ProgressResponse>), ApiError> {
    let entry = services.progress().record_progress(id, input).await?;
    Ok((StatusCode::CREATED, Json(ProgressResponse::from(&entry))))
}

pub async fn delete_progress(
    State(services): State<AppServices>,
    Path((id, entry_id)): Path<(WorkoutId, ProgressId)>,
) -> Result<StatusCode, ApiError> {
    services.progress().delete_progress(id, entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn workout_score(
    State(services): State<AppServices>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let score = services.progress().workout_progress(id).await?;
    Ok(Json(ScoreResponse {
        workout_id: id,
        score,
    }))
}
