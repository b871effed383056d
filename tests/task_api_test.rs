use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use taskserver::api_router::configure_api_routes;
use taskserver::core::config::{AppConfig, AuthConfig, ServerConfig};
use taskserver::core::state::AppState;
use taskserver::core::test_utils::{InMemoryTaskStore, InMemoryUserStore};
use taskserver::security::JwtManager;
use taskserver::tasks::TaskStore;

const TEST_SECRET: &str = "integration-test-secret-key-at-least-32-chars";

struct TestEnv {
    router: Router,
    state: Arc<AppState>,
    tasks: Arc<InMemoryTaskStore>,
}

fn test_env() -> TestEnv {
    let tasks = Arc::new(InMemoryTaskStore::new());
    let state = Arc::new(AppState {
        config: AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database_url: "postgres://unused-in-tests".into(),
            auth: AuthConfig {
                jwt_secret: TEST_SECRET.into(),
                token_expiry_minutes: 60,
            },
        },
        tasks: Arc::clone(&tasks) as Arc<dyn TaskStore>,
        users: Arc::new(InMemoryUserStore::new()),
        jwt: Arc::new(JwtManager::from_secret(TEST_SECRET).expect("jwt manager")),
    });

    TestEnv {
        router: configure_api_routes(Arc::clone(&state)),
        state,
        tasks,
    }
}

fn bearer(env: &TestEnv) -> String {
    env.state
        .jwt
        .issue(Uuid::new_v4(), None)
        .expect("issue token")
        .token
}

async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = router.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse body")
    };
    (status, value)
}

fn sample_task() -> Value {
    json!({
        "title": "New Task",
        "description": "Task description",
        "status": "pending",
        "due_date": "2024-12-31"
    })
}

#[tokio::test]
async fn test_list_on_empty_store_returns_message() {
    let env = test_env();
    let token = bearer(&env);

    let (status, body) = request(&env.router, "GET", "/api/tasks", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No se encontraron tareas");
    assert_eq!(body["status"], 200);
    assert!(body.get("tasks").is_none());
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let env = test_env();
    let token = bearer(&env);

    let (status, body) = request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(sample_task()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["task"]["title"], "New Task");
    assert_eq!(body["task"]["description"], "Task description");
    assert_eq!(body["task"]["status"], "pending");
    assert_eq!(body["task"]["due_date"], "2024-12-31");
    assert!(body["task"]["id"].is_i64());
    assert!(body["task"]["created_at"].is_string());
    assert!(body["task"]["updated_at"].is_string());

    let id = body["task"]["id"].as_i64().expect("task id");
    let (status, body) = request(
        &env.router,
        "GET",
        &format!("/api/tasks/{id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["task"]["id"], id);
    assert_eq!(body["task"]["title"], "New Task");
    assert_eq!(body["task"]["due_date"], "2024-12-31");
}

#[tokio::test]
async fn test_create_with_invalid_payload_returns_field_errors() {
    let env = test_env();
    let token = bearer(&env);

    let (status, body) = request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(json!({
            "title": "x".repeat(200),
            "status": "done",
            "due_date": "31/12/2024"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Error en la validación de los datos");
    assert_eq!(
        body["errors"]["title"][0],
        "El campo título no debe ser mayor que 155 caracteres"
    );
    assert_eq!(
        body["errors"]["description"][0],
        "El campo descripción es obligatorio"
    );
    assert_eq!(
        body["errors"]["status"][0],
        "El campo estado debe ser uno de: pending, in_progress, completed"
    );
    assert!(body["errors"]["due_date"][0].is_string());

    assert!(env.tasks.is_empty(), "store must not be touched");
}

#[tokio::test]
async fn test_non_numeric_id_rejected_before_store() {
    let env = test_env();
    let token = bearer(&env);

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(sample_task())),
        ("DELETE", None),
    ] {
        let (status, response) = request(
            &env.router,
            method,
            "/api/tasks/abc",
            Some(&token),
            body,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} /api/tasks/abc");
        assert_eq!(response["message"], "El identificador debe ser numérico");
        assert_eq!(response["status"], 400);
    }
}

#[tokio::test]
async fn test_missing_id_returns_404() {
    let env = test_env();
    let token = bearer(&env);

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(sample_task())),
        ("DELETE", None),
    ] {
        let (status, response) = request(
            &env.router,
            method,
            "/api/tasks/999",
            Some(&token),
            body,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{method} /api/tasks/999");
        assert_eq!(response["message"], "Tarea no encontrada");
        assert_eq!(response["status"], 404);
    }
}

#[tokio::test]
async fn test_delete_twice_returns_404_second_time() {
    let env = test_env();
    let token = bearer(&env);

    let (_, body) = request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(sample_task()),
    )
    .await;
    let id = body["task"]["id"].as_i64().expect("task id");

    let (status, body) = request(
        &env.router,
        "DELETE",
        &format!("/api/tasks/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tarea eliminada correctamente");

    let (status, _) = request(
        &env.router,
        "DELETE",
        &format!("/api/tasks/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let env = test_env();
    let token = bearer(&env);

    let (_, body) = request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(sample_task()),
    )
    .await;
    let id = body["task"]["id"].as_i64().expect("task id");

    let (status, body) = request(
        &env.router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(&token),
        Some(json!({
            "title": "Updated Task",
            "description": "Updated description",
            "status": "in_progress",
            "due_date": "2024-12-31"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tarea actualizada correctamente");
    assert_eq!(body["task"]["status"], "in_progress");
    assert_eq!(body["task"]["title"], "Updated Task");

    let stored = env.tasks.find(id as i32).await.expect("find").expect("task");
    assert_eq!(stored.status, taskserver::tasks::TaskStatus::InProgress);
}

#[tokio::test]
async fn test_update_with_invalid_body_keeps_stored_task() {
    let env = test_env();
    let token = bearer(&env);

    let (_, body) = request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(sample_task()),
    )
    .await;
    let id = body["task"]["id"].as_i64().expect("task id");

    let (status, body) = request(
        &env.router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(&token),
        Some(json!({ "title": "Only a title" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["description"][0].is_string());

    let stored = env.tasks.find(id as i32).await.expect("find").expect("task");
    assert_eq!(stored.title, "New Task");
}

#[tokio::test]
async fn test_filter_by_status_selects_matching() {
    let env = test_env();
    let token = bearer(&env);

    for status in ["pending", "in_progress"] {
        let mut task = sample_task();
        task["title"] = json!(format!("Task {status}"));
        task["status"] = json!(status);
        request(&env.router, "POST", "/api/tasks", Some(&token), Some(task)).await;
    }

    let (status, body) = request(
        &env.router,
        "GET",
        "/api/tasks/filter/status/pending",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["status"], "pending");

    let (status, body) = request(
        &env.router,
        "GET",
        "/api/tasks/filter/status/completed",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No se encontraron tareas");
}

#[tokio::test]
async fn test_filter_by_unknown_status_rejected() {
    let env = test_env();
    let token = bearer(&env);

    let (status, body) = request(
        &env.router,
        "GET",
        "/api/tasks/filter/status/archived",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert_eq!(
        body["message"],
        "El campo estado debe ser uno de: pending, in_progress, completed"
    );
}

#[tokio::test]
async fn test_filter_by_due_date_selects_matching() {
    let env = test_env();
    let token = bearer(&env);

    let mut due_today = sample_task();
    due_today["due_date"] = json!("2024-12-31");
    let mut due_tomorrow = sample_task();
    due_tomorrow["title"] = json!("Later Task");
    due_tomorrow["due_date"] = json!("2025-01-01");

    request(&env.router, "POST", "/api/tasks", Some(&token), Some(due_today)).await;
    request(
        &env.router,
        "POST",
        "/api/tasks",
        Some(&token),
        Some(due_tomorrow),
    )
    .await;

    let (status, body) = request(
        &env.router,
        "GET",
        "/api/tasks/filter/due-date/2024-12-31",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tasks = body["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["due_date"], "2024-12-31");
}

#[tokio::test]
async fn test_filter_by_malformed_date_rejected() {
    let env = test_env();
    let token = bearer(&env);

    let (status, body) = request(
        &env.router,
        "GET",
        "/api/tasks/filter/due-date/31-12-2024",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_requests_without_token_rejected() {
    let env = test_env();

    let (status, body) = request(&env.router, "GET", "/api/tasks", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No autenticado");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let env = test_env();

    let (status, _) = request(
        &env.router,
        "GET",
        "/api/tasks",
        Some("not.a.token"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let env = test_env();

    let (status, body) = request(&env.router, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}
