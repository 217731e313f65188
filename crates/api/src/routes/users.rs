use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use fitness_core::model::UserId;
use services::{AppServices, UserPatch};

use crate::dto::{CreateUser, ListQuery, UserResponse, to_responses};
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};

pub async fn list_users(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = services.users().list_users(query.limit()).await?;
    Ok(Json(to_responses(&users)))
}

pub async fn create_user(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = services
        .users()
        .create_user(body.username, body.email)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

pub async fn get_user(
    State(services): State<AppServices>,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = services.users().get_user(id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn update_user(
    State(services): State<AppServices>,
    Path(id): Path<UserId>,
    JsonBody(patch): JsonBody<UserPatch>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = services.users().update_user(id, patch).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn delete_user(
    State(services): State<AppServices>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    services.users().delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
