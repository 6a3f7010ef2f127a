//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

/// Liveness response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed greeting
    pub message: &'static str,
}

/// Liveness probe.
///
/// Always 200 while the process can answer; it does not consult the store
/// (use `/ready` for that).
///
/// ```bash
/// curl http://localhost:8080/healthCheck
/// # {"message":"Hi I am running"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Hi I am running",
    })
}
