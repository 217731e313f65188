//! Handlers for muscle groups, equipment and intensity levels.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use fitness_core::model::{EquipmentId, IntensityLevelId, MuscleGroupId};
use services::{AppServices, CatalogEntryPatch, IntensityLevelPatch};

use crate::dto::{
    CreateCatalogEntry, CreateIntensityLevel, EquipmentResponse, IntensityLevelResponse,
    ListQuery, MuscleGroupResponse, to_responses,
};
use crate::error::ApiError;
use crate::extract::{JsonBody, Path, Query};

pub async fn list_muscle_groups(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<MuscleGroupResponse>>, ApiError> {
    let groups = services.catalog().list_muscle_groups(query.limit()).await?;
    Ok(Json(to_responses(&groups)))
}

pub async fn create_muscle_group(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateCatalogEntry>,
) -> Result<(StatusCode, Json<MuscleGroupResponse>), ApiError> {
    let group = services
        .catalog()
        .create_muscle_group(body.name, body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(MuscleGroupResponse::from(&group))))
}

pub async fn get_muscle_group(
    State(services): State<AppServices>,
    Path(id): Path<MuscleGroupId>,
) -> Result<Json<MuscleGroupResponse>, ApiError> {
    let group = services.catalog().get_muscle_group(id).await?;
    Ok(Json(MuscleGroupResponse::from(&group)))
}

pub async fn update_muscle_group(
    State(services): State<AppServices>,
    Path(id): Path<MuscleGroupId>,
    JsonBody(patch): JsonBody<CatalogEntryPatch>,
) -> Result<Json<MuscleGroupResponse>, ApiError> {
    let group = services.catalog().update_muscle_group(id, patch).await?;
    Ok(Json(MuscleGroupResponse::from(&group)))
}

pub async fn delete_muscle_group(
    State(services): State<AppServices>,
    Path(id): Path<MuscleGroupId>,
) -> Result<StatusCode, ApiError> {
    services.catalog().delete_muscle_group(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_equipment(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let equipment = services.catalog().list_equipment(query.limit()).await?;
    Ok(Json(to_responses(&equipment)))
}

pub async fn create_equipment(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateCatalogEntry>,
) -> Result<(StatusCode, Json<EquipmentResponse>), ApiError> {
    let equipment = services
        .catalog()
        .create_equipment(body.name, body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(EquipmentResponse::from(&equipment))))
}

pub async fn get_equipment(
    State(services): State<AppServices>,
    Path(id): Path<EquipmentId>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let equipment = services.catalog().get_equipment(id).await?;
    Ok(Json(EquipmentResponse::from(&equipment)))
}

pub async fn update_equipment(
    State(services): State<AppServices>,
    Path(id): Path<EquipmentId>,
    JsonBody(patch): JsonBody<CatalogEntryPatch>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    let equipment = services.catalog().update_equipment(id, patch).await?;
    Ok(Json(EquipmentResponse::from(&equipment)))
}

pub async fn delete_equipment(
    State(services): State<AppServices>,
    Path(id): Path<EquipmentId>,
) -> Result<StatusCode, ApiError> {
    services.catalog().delete_equipment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_intensity_levels(
    State(services): State<AppServices>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<IntensityLevelResponse>>, ApiError> {
    let levels = services
        .catalog()
        .list_intensity_levels(query.limit())
        .await?;
    Ok(Json(to_responses(&levels)))
}

pub async fn create_intensity_level(
    State(services): State<AppServices>,
    JsonBody(body): JsonBody<CreateIntensityLevel>,
) -> Result<(StatusCode, Json<IntensityLevelResponse>), ApiError> {
    let level = services
        .catalog()
        .create_intensity_level(body.name, body.level)
        .await?;
    Ok((StatusCode::CREATED, Json(IntensityLevelResponse::from(&level))))
}

pub async fn get_intensity_level(
    State(services): State<AppServices>,
    Path(id): Path<IntensityLevelId>,
) -> Result<Json<IntensityLevelResponse>, ApiError> {
    let level = services.catalog().get_intensity_level(id).await?;
    Ok(Json(IntensityLevelResponse::from(&level)))
}

pub async fn update_intensity_level(
    State(services): State<AppServices>,
    Path(id): Path<IntensityLevelId>,
    JsonBody(patch): JsonBody<IntensityLevelPatch>,
) -> Result<Json<IntensityLevelResponse>, ApiError> {
    let level = services.catalog().update_intensity_level(id, patch).await?;
    Ok(Json(IntensityLevelResponse::from(&level)))
}

pub async fn delete_intensity_level(
    State(services): State<AppServices>,
    Path(id): Path<IntensityLevelId>,
) -> Result<StatusCode, ApiError> {
    services.catalog().delete_intensity_level(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
