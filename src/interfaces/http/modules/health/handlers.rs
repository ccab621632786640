//! Root and health check handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointIndex {
    pub health: String,
    pub gadgets: String,
    pub auth: String,
    pub docs: String,
    pub metrics: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointIndex,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".into(),
        message: "IMF Gadget API is running".into(),
        timestamp: Utc::now(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Welcome and endpoint index", body = WelcomeResponse))
)]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to IMF Gadget API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints: EndpointIndex {
            health: "/health".into(),
            gadgets: "/api/gadgets".into(),
            auth: "/api/auth".into(),
            docs: "/docs".into(),
            metrics: "/metrics".into(),
        },
    })
}
