use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use fitness_core::model::GoalId;
use services::{AppServices, GoalPatch};

use crate::dto::{
    CreateGoal, GoalAchievedResponse, GoalProgressResponse, GoalResponse, ListQuery, WorkoutQuery,
    to_responses,
};
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query, RequestingUser};

pub async fn list_goals(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GoalResponse>>, ApiError> {
    let goals = services
        .goals()
        .list_goals(query.user_id, query.limit())
        .await?;
    Ok(Json(to_responses(&goals)))
}

pub async fn create_goal(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateGoal>,
) -> Result<(StatusCode, Json<GoalResponse>), ApiError> {
    let goal = services
        .goals()
        .create_goal(body.user_id, body.name, body.description, body.target)
        .await?;
    Ok((StatusCode::CREATED, Json(GoalResponse::from(&goal))))
}

pub async fn get_goal(
    State(services): State<AppServices>,
    Path(id): Path<GoalId>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = services.goals().get_goal(id).await?;
    Ok(Json(GoalResponse::from(&goal)))
}

pub async fn update_goal(
    State(services): State<AppServices>,
    Path(id): Path<GoalId>,
    JsonBody(patch): JsonBody<GoalPatch>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = services.goals().update_goal(id, patch).await?;
    Ok(Json(GoalResponse::from(&goal)))
}

pub async fn delete_goal(
    State(services): State<AppServices>,
    Path(id): Path<GoalId>,
) -> Result<StatusCode, ApiError> {
    services.goals().delete_goal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn goal_progress(
    State(services): State<AppServices>,
    Path(id): Path<GoalId>,
    Query(query): Query<WorkoutQuery>,
) -> Result<Json<GoalProgressResponse>, ApiError> {
    let percent = services
        .progress()
        .goal_progress(id, query.workout_id)
        .await?;
    Ok(Json(GoalProgressResponse {
        goal_id: id,
        workout_id: query.workout_id,
        percent,
    }))
}

pub async fn goal_achieved(
    State(services): State<AppServices>,
    RequestingUser(user_id): RequestingUser,
    Path(id): Path<GoalId>,
    Query(query): Query<WorkoutQuery>,
) -> Result<Json<GoalAchievedResponse>, ApiError> {
    let achieved = services
        .progress()
        .goal_achieved(id, query.workout_id, user_id)
        .await?;
    Ok(Json(GoalAchievedResponse {
        goal_id: id,
        workout_id: query.workout_id,
        achieved,
    }))
}
