#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use guestctl_server::db::{create_pool, ensure_schema};
use guestctl_server::http::{build_router, ServerConfig};
use guestctl_server::{EventSchedule, GuestRegistry};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

pub const EVENT_DATE: &str = "2025-12-20 18:00:00";
pub const TOKEN_EXPIRES_AT: &str = "2025-12-21 18:00:00";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = create_pool(&dir.path().join("invitados.db"))
            .await
            .expect("pool");
        ensure_schema(&pool).await.expect("schema");

        let schedule: EventSchedule = EVENT_DATE.parse().expect("event date");
        let registry = GuestRegistry::new(pool.clone(), schedule);
        let router = build_router(registry, &ServerConfig::default());

        Self {
            router,
            pool,
            _dir: dir,
        }
    }

    pub async fn post_raw(&self, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/admin/guests")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send(request).await
    }

    pub async fn create_guest(&self, body: &Value) -> (StatusCode, Value) {
        self.post_raw(&serde_json::to_string(body).unwrap()).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn list_guests(&self, query: &str) -> Vec<Value> {
        let uri = if query.is_empty() {
            "/admin/guests".to_owned()
        } else {
            format!("/admin/guests?{query}")
        };
        let (status, body) = self.get(&uri).await;
        assert_eq!(status, StatusCode::OK);
        body["data"].as_array().cloned().expect("data array")
    }

    pub async fn guest_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM guests")
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
