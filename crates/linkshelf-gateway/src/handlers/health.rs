use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Liveness check. Does not touch the storage.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
