//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router, plus utilities for user creation, admin grants, and session
//! cookies. Database pools come from `#[sqlx::test]`, which provisions an
//! isolated, migrated database per test.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use uw_server::api::{create_router, AppState};
use uw_server::config::Config;

/// A response with its body already collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The session cookie set by this response ("name=value"), if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(';').next())
            .map(ToOwned::to_owned)
    }
}

/// Test harness wrapping the full application router.
pub struct TestApp {
    router: Router,
    pub pool: PgPool,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        let state = AppState::new(pool.clone(), Config::default_for_test());
        Self {
            router: create_router(state),
            pool,
        }
    }

    /// Send a request through the router.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, cookie, None).await
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, path, cookie, Some(body)).await
    }

    pub async fn post_empty(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::POST, path, cookie, None).await
    }

    pub async fn patch(&self, path: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, cookie, Some(body)).await
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, path, cookie, None).await
    }
}

/// Password used by all test users.
pub const TEST_PASSWORD: &str = "password123!";

/// Register a user through the API and return their session cookie.
pub async fn register_user(app: &TestApp, username: &str) -> String {
    let response = app
        .post(
            "/api/register",
            None,
            serde_json::json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": TEST_PASSWORD,
                "confirmPassword": TEST_PASSWORD,
            }),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "registration failed: {:?}",
        response.body
    );
    response.session_cookie().expect("No session cookie set")
}

/// Escalate a user's role directly in the database.
pub async fn set_role(pool: &PgPool, username: &str, role: &str) {
    sqlx::query("UPDATE users SET role = $2::user_role WHERE username = $1")
        .bind(username)
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to set role");
}

/// Register a user and grant admin. The existing cookie keeps working
/// because the principal is re-read from the users row on every request.
pub async fn register_admin(app: &TestApp, username: &str) -> String {
    let cookie = register_user(app, username).await;
    set_role(&app.pool, username, "admin").await;
    cookie
}
