//! Shared test helpers for API integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use campus_portfolio_lib::AppState;
use campus_portfolio_lib::config::{
    AdminBootstrap, Config, DatabaseSettings, Environment, StorageSettings,
};
use campus_portfolio_lib::db::DbPool;
use campus_portfolio_lib::services::{MemoryStore, Storage};

/// Client token used in tests.
pub const TEST_TOKEN: &str = "test-client-token-for-api-tests";

/// Bootstrap admin configured for every test app.
pub const ADMIN_EMAIL: &str = "admin@college.edu";

/// Password that satisfies every signup rule.
pub const PASSWORD: &str = "Str0ng!pass";

/// Upload limit for tests, small enough to exceed cheaply.
pub const MAX_UPLOAD: usize = 4096;

pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        api_token: TEST_TOKEN.to_string(),
        admin: Some(AdminBootstrap {
            email: ADMIN_EMAIL.to_string(),
            password: "Adm1n!pass".to_string(),
        }),
        allowed_origins: vec![],
        static_dir: None,
        max_upload_size: MAX_UPLOAD,
        otp_ttl_secs: 300,
        storage: StorageSettings {
            endpoint: None,
            bucket: "test".to_string(),
            region: "us-east-1".to_string(),
            access_key: "test".to_string(),
            secret_key: "test".to_string(),
            public_url: None,
        },
    }
}

/// Fresh migrated in-memory database. One connection, so every query sees
/// the same database.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::new(&test_config().database)
        .await
        .expect("Failed to open in-memory SQLite");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Everything a test needs to poke at behind the app.
pub struct TestContext {
    pub pool: DbPool,
    pub memory: MemoryStore,
}

pub async fn create_test_app() -> (
    impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    TestContext,
) {
    let pool = create_test_pool().await;
    let memory = MemoryStore::new();
    let storage = Storage::new(Arc::new(memory.clone()), None);
    let state = AppState::new(pool.clone(), storage, test_config());

    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    (app, TestContext { pool, memory })
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn authed(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", TEST_TOKEN)))
}

pub async fn get<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, authed(test::TestRequest::get().uri(uri))).await
}

pub async fn post<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, authed(test::TestRequest::post().uri(uri).set_json(body))).await
}

pub async fn delete<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    send(app, authed(test::TestRequest::delete().uri(uri).set_json(body))).await
}

pub fn student_signup(name: &str, email: &str, roll_no: &str) -> Value {
    json!({
        "fullName": name,
        "email": email,
        "password": PASSWORD,
        "role": "student",
        "department": "CSE",
        "yearSemester": "3rd Year",
        "rollNo": roll_no,
    })
}

/// Sign up a student and return the response body.
pub async fn signup_student<S>(app: &S, name: &str, email: &str, roll_no: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post(
        app,
        "/api/v1/auth/signup",
        student_signup(name, email, roll_no),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body
}

pub async fn set_status<S>(app: &S, email: &str, status: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    post(
        app,
        "/api/v1/admin/update-status",
        json!({ "email": email, "status": status }),
    )
    .await
}

/// Sign up and approve a student.
pub async fn approved_student<S>(app: &S, name: &str, email: &str, roll_no: &str)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    signup_student(app, name, email, roll_no).await;
    let (status, body) = set_status(app, email, "approved").await;
    assert_eq!(status, StatusCode::OK, "approve failed: {body}");
}
