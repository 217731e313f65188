use api::{DEFAULT_CORS_ORIGIN, HeaderValue};
use fitness_core::model::{Goal, GoalId, UserId};
use fitness_core::time::{fixed_clock, fixed_now};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use services::AppServices;
use storage::repository::Storage;
use tokio::net::TcpListener;

async fn spawn(services: AppServices) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    let app = api::router(services, HeaderValue::from_static(DEFAULT_CORS_ORIGIN));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{address}")
}

async fn spawn_in_memory() -> String {
    spawn(AppServices::in_memory(fixed_clock())).await
}

async fn post(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client.post(url).json(&body).send().await.expect("post");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("get");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

/// Creates a user, a workout and a goal with target 20; returns their ids.
async fn seed(client: &Client, base: &str, email: &str) -> (u64, u64, u64) {
    let (status, user) = post(
        client,
        format!("{base}/users"),
        json!({ "username": "jo", "email": email }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["id"].as_u64().unwrap();

    let (status, workout) = post(
        client,
        format!("{base}/workouts"),
        json!({ "user_id": user_id, "name": "Squat" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let workout_id = workout["id"].as_u64().unwrap();

    let (status, goal) = post(
        client,
        format!("{base}/goals"),
        json!({ "user_id": user_id, "name": "Squat volume", "target": 20.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = goal["id"].as_u64().unwrap();

    (user_id, workout_id, goal_id)
}

async fn record(client: &Client, base: &str, workout_id: u64, reps: u32, sets: u32) {
    let (status, _) = post(
        client,
        format!("{base}/workouts/{workout_id}/progress"),
        json!({ "reps": reps, "sets": sets, "weight_lifted": 80.0, "duration_minutes": 30 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn health_is_ok() {
    let base = spawn_in_memory().await;
    let (status, body) = get(&Client::new(), format!("{base}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn user_crud_status_codes() {
    let base = spawn_in_memory().await;
    let client = Client::new();

    let (status, user) = post(
        &client,
        format!("{base}/users"),
        json!({ "username": "kim", "email": "kim@gym.io" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = user["id"].as_u64().unwrap();

    let (status, body) = post(
        &client,
        format!("{base}/users"),
        json!({ "username": "kim2", "email": "KIM@gym.io" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, body) = post(
        &client,
        format!("{base}/users"),
        json!({ "username": "lee", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("email"));

    let response = client
        .put(format!("{base}/users/{id}"))
        .json(&json!({ "username": "kimberly" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["username"], "kimberly");
    assert_eq!(updated["email"], "kim@gym.io");

    let response = client
        .delete(format!("{base}/users/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&client, format!("{base}/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn progress_score_and_goal_evaluation() {
    let base = spawn_in_memory().await;
    let client = Client::new();
    let (user_id, workout_id, goal_id) = seed(&client, &base, "mo@gym.io").await;

    let (status, body) = get(&client, format!("{base}/workouts/{workout_id}/score")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"].as_f64(), Some(0.0));

    record(&client, &base, workout_id, 4, 3).await;
    record(&client, &base, workout_id, 2, 1).await;

    let (_, body) = get(&client, format!("{base}/workouts/{workout_id}/score")).await;
    assert_eq!(body["score"].as_f64(), Some(2.5));

    // Volume is 4*3 + 2*1 = 14 of 20.
    let (status, body) = get(
        &client,
        format!("{base}/goals/{goal_id}/progress?workout_id={workout_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["percent"].as_f64(), Some(70.0));

    let achieved_url = format!("{base}/goals/{goal_id}/achieved?workout_id={workout_id}");
    let response = client
        .get(&achieved_url)
        .header("X-User-Id", user_id.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["achieved"], false);

    record(&client, &base, workout_id, 6, 1).await;
    let body: Value = client
        .get(&achieved_url)
        .header("X-User-Id", user_id.to_string())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["achieved"], true);

    let (status, entries) = get(&client, format!("{base}/workouts/{workout_id}/progress")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entries.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn goal_achieved_requires_owner_header() {
    let base = spawn_in_memory().await;
    let client = Client::new();
    let (user_id, workout_id, goal_id) = seed(&client, &base, "ny@gym.io").await;
    let url = format!("{base}/goals/{goal_id}/achieved?workout_id={workout_id}");

    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(&url)
        .header("X-User-Id", "abc")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(&url)
        .header("X-User-Id", (user_id + 1_000).to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let (_, rival_workout, _) = seed(&client, &base, "rival@gym.io").await;
    record(&client, &base, rival_workout, 20, 1).await;
    let response = client
        .get(format!(
            "{base}/goals/{goal_id}/achieved?workout_id={rival_workout}"
        ))
        .header("X-User-Id", user_id.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn zero_target_goal_is_unprocessable() {
    let storage = Storage::in_memory();
    let base = spawn(AppServices::from_storage(&storage, fixed_clock())).await;
    let client = Client::new();
    let (user_id, workout_id, goal_id) = seed(&client, &base, "oz@gym.io").await;

    // Rows written before targets were validated can still hold zero.
    let legacy = Goal::from_persisted(
        GoalId::new(goal_id),
        UserId::new(user_id),
        "Legacy".to_owned(),
        None,
        0.0,
        fixed_now(),
    )
    .unwrap();
    storage.goals.update_goal(&legacy).await.unwrap();

    let (status, body) = get(
        &client,
        format!("{base}/goals/{goal_id}/progress?workout_id={workout_id}"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("zero"));
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let base = spawn_in_memory().await;
    let client = Client::new();

    for path in [
        "/users/1",
        "/goals/1",
        "/workouts/1",
        "/workouts/1/score",
        "/muscle-groups/1",
        "/equipment/1",
        "/intensity-levels/1",
    ] {
        let (status, body) = get(&client, format!("{base}{path}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert!(body["error"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let base = spawn_in_memory().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/users"))
        .header("content-type", "application/json")
        .body("{bad")
        .send()
        .await
        .expect("post");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("json error body");
    assert!(body["error"].is_string());

    let (status, body) = post(
        &client,
        format!("{base}/users"),
        json!({ "username": 7, "email": "x@y.io" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, body) = get(&client, format!("{base}/users/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));

    let (status, body) = get(&client, format!("{base}/goals/1/progress")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("workout_id"));

    let (status, body) = get(&client, format!("{base}/users?limit=lots")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn catalog_validation_and_orphans() {
    let base = spawn_in_memory().await;
    let client = Client::new();

    let (status, _) = post(
        &client,
        format!("{base}/intensity-levels"),
        json!({ "name": "Beyond", "level": 11 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, level) = post(
        &client,
        format!("{base}/intensity-levels"),
        json!({ "name": "Moderate", "level": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(level["level"], 5);

    let (status, _) = post(
        &client,
        format!("{base}/goals"),
        json!({ "user_id": 77, "name": "Orphan", "target": 10.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post(
        &client,
        format!("{base}/workouts/42/progress"),
        json!({ "reps": 1, "sets": 1, "weight_lifted": 0.0, "duration_minutes": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let base = spawn_in_memory().await;
    let response = Client::new()
        .request(Method::OPTIONS, format!("{base}/goals/1/achieved"))
        .header("Origin", DEFAULT_CORS_ORIGIN)
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "x-user-id")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some(DEFAULT_CORS_ORIGIN)
    );
}
