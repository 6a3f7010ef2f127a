//! Readiness endpoint backed by a [`Store`].

use axum::{Json, extract::State, http::StatusCode};
use classbook_core::reducer::Reducer;
use classbook_runtime::{HealthCheck, HealthStatus, Store};
use std::sync::Arc;

/// Readiness probe reporting the store's health.
///
/// # Status Codes
///
/// - 200 OK: the store accepts actions
/// - 503 Service Unavailable: the store is shutting down
///
/// # Response
///
/// ```json
/// {
///   "component": "store",
///   "status": "healthy",
///   "metadata": [["subscribers", "1"]]
/// }
/// ```
pub async fn readiness_check<S, A, E, R>(
    State(store): State<Arc<Store<S, A, E, R>>>,
) -> (StatusCode, Json<HealthCheck>)
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    S: Send + Sync + 'static,
    A: Send + Clone + 'static,
    E: Send + Sync + 'static,
{
    let health = store.health();

    let status = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(health))
}
