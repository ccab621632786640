#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

use imf_gadgets::domain::RepositoryProvider;
use imf_gadgets::infrastructure::database::seed::seed_reference_users;
use imf_gadgets::{create_api_router, run_migrations, AppConfig, SeaOrmRepositoryProvider};

pub const PASSWORD: &str = "password";

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.security.bcrypt_cost = 4;
    cfg.security.jwt_secret = "integration-test-secret".into();
    cfg
}

pub async fn spawn_app_with(cfg: AppConfig) -> TestApp {
    let db = memory_db().await;
    seed_reference_users(&db, PASSWORD, cfg.security.bcrypt_cost)
        .await
        .unwrap();

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let router = create_api_router(repos, cfg.jwt_config(), &cfg, handle);
    TestApp { router, db }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
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

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send("GET", uri, None, None).await
    }

    pub async fn login(&self, username: &str) -> String {
        let res = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }

    pub async fn agent_token(&self) -> String {
        self.login("agent007").await
    }

    pub async fn admin_token(&self) -> String {
        self.login("missioncontrol").await
    }

    /// Create a gadget as the reference agent and return its JSON.
    pub async fn create_gadget(&self, token: &str, name: &str, codename: &str) -> Value {
        let res = self
            .send(
                "POST",
                "/api/gadgets",
                Some(token),
                Some(serde_json::json!({ "name": name, "codename": codename })),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.body);
        res.body["gadget"].clone()
    }
}
