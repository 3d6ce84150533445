#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use submission_service::services::{
    database::Database, jwt::JwtService, storage::LocalStorage,
};
use submission_service::startup::build_router;
use submission_service::AppState;

pub const DEMO_PASSWORD: &str = "changeme";
pub const MULTIPART_BOUNDARY: &str = "test-boundary-7f4a";

/// A router wired to fresh in-memory state, seeded with the four demo
/// department accounts and two demo clients.
pub struct TestApp {
    pub router: Router,
    pub db: Arc<Database>,
    _upload_dir: tempfile::TempDir,
}

pub async fn spawn_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("failed to create temp upload dir");
    let db = Arc::new(Database::new());
    db.seed_demo(DEMO_PASSWORD).await.expect("seeding failed");

    let jwt = Arc::new(JwtService::new("test_signing_secret", 24));
    let storage = Arc::new(
        LocalStorage::new(upload_dir.path())
            .await
            .expect("failed to init storage"),
    );
    let state = AppState::new(db.clone(), jwt, storage);

    TestApp {
        router: build_router(state),
        db,
        _upload_dir: upload_dir,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Login as one of the seeded accounts and return the session token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token in response").to_string()
    }

    /// Upload a document through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        application_id: i64,
        file_type: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> (StatusCode, Value) {
        let body = multipart_body(application_id, file_type, file_name, bytes);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Create a client and an application for it directly in the store.
    pub async fn seed_application(&self, product_name: &str) -> i64 {
        let client = self.db.insert_client("Test Client Ltd", "RC000001").await;
        self.db
            .insert_application(product_name, client.id)
            .await
            .unwrap()
            .id
    }
}

fn multipart_body(application_id: i64, file_type: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    let b = MULTIPART_BOUNDARY;
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"application_id\"\r\n\r\n{application_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{b}\r\nContent-Disposition: form-data; name=\"file_type\"\r\n\r\n{file_type}\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{b}--\r\n").as_bytes());
    body
}
