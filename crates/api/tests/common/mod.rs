//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hourbook_api::auth::jwt::{generate_access_token, JwtConfig};
use hourbook_api::config::ServerConfig;
use hourbook_api::router::build_app_router;
use hourbook_api::state::AppState;
use hourbook_core::roles::ROLE_EMPLOYEE;
use hourbook_core::types::DbId;

const TEST_JWT_SECRET: &str = "hourbook-integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

/// Mint an access token accepted by [`build_test_app`].
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn employee_token(user_id: DbId) -> String {
    token_for(user_id, ROLE_EMPLOYEE)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST without a body.
pub async fn post_empty(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the `data` field of the envelope.
pub async fn expect_data(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn insert_user(pool: &PgPool, email: &str, rate: Option<f64>) -> DbId {
    sqlx::query_scalar("INSERT INTO users (email, hourly_rate) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(rate)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_project(pool: &PgPool, name: &str, manager_id: Option<DbId>) -> DbId {
    sqlx::query_scalar("INSERT INTO projects (name, user_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(manager_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn add_member(pool: &PgPool, project_id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO projects_users (project_id, user_id) VALUES ($1, $2)")
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_task(pool: &PgPool, project_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO tasks (project_id, name) VALUES ($1, $2) RETURNING id")
        .bind(project_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Owner (member, rate 50), project manager, and an unrelated employee.
pub struct Seed {
    pub owner: DbId,
    pub manager: DbId,
    pub outsider: DbId,
    pub project: DbId,
    pub task: DbId,
}

pub async fn seed(pool: &PgPool) -> Seed {
    let owner = insert_user(pool, "owner@example.com", Some(50.0)).await;
    let manager = insert_user(pool, "manager@example.com", None).await;
    let outsider = insert_user(pool, "outsider@example.com", None).await;
    let project = insert_project(pool, "Website", Some(manager)).await;
    add_member(pool, project, owner).await;
    let task = insert_task(pool, project, "Design").await;
    Seed {
        owner,
        manager,
        outsider,
        project,
        task,
    }
}
