use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

/// Liveness check.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}
