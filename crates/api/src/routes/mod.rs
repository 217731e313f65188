use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    routing::get,
};
use serde_json::{Value, json};
use services::AppServices;
use tower_http::cors::CorsLayer;

use crate::extract::USER_ID_HEADER;

pub mod catalog;
pub mod goals;
pub mod users;
pub mod workouts;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
        .max_age(Duration::from_secs(60 * 60))
}

/// Every route the service exposes, wrapped in CORS for `cors_origin`.
pub fn router(services: AppServices, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/goals", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/goals/{id}",
            get(goals::get_goal)
                .put(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route("/goals/{id}/progress", get(goals::goal_progress))
        .route("/goals/{id}/achieved", get(goals::goal_achieved))
        .route(
            "/muscle-groups",
            get(catalog::list_muscle_groups).post(catalog::create_muscle_group),
        )
        .route(
            "/muscle-groups/{id}",
            get(catalog::get_muscle_group)
                .put(catalog::update_muscle_group)
                .delete(catalog::delete_muscle_group),
        )
        .route(
            "/equipment",
            get(catalog::list_equipment).post(catalog::create_equipment),
        )
        .route(
            "/equipment/{id}",
            get(catalog::get_equipment)
                .put(catalog::update_equipment)
                .delete(catalog::delete_equipment),
        )
        .route(
            "/intensity-levels",
            get(catalog::list_intensity_levels).post(catalog::create_intensity_level),
        )
        .route(
            "/intensity-levels/{id}",
            get(catalog::get_intensity_level)
                .put(catalog::update_intensity_level)
                .delete(catalog::delete_intensity_level),
        )
        .route(
            "/workouts",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route(
            "/workouts/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
        .route(
            "/workouts/{id}/progress",
            get(workouts::list_progress).post(workouts::record_progress),
        )
        .route(
            "/workouts/{id}/progress/{entry_id}",
            axum::routing::delete(workouts::delete_progress),
        )
        .route("/workouts/{id}/score", get(workouts::workout_score))
        .layer(cors(cors_origin))
        .with_state(services)
}
