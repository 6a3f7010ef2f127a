//! Router configuration for the Classbook service.

use super::health::health_check;
use super::state::AppState;
use crate::api::{bookings, classes, members};
use axum::{
    Router,
    routing::{get, post},
};
use classbook_core::booking::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
use classbook_web::{correlation_id_layer, handlers::readiness_check};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/healthCheck` | liveness |
/// | GET | `/ready` | store readiness |
/// | POST | `/createMember` | register a member |
/// | GET | `/members/:mobileNumber` | look up a member |
/// | POST | `/classes` | schedule a class over a date range |
/// | GET | `/classes/:className/:date` | look up one class occurrence |
/// | POST | `/bookings` | book a member into a class occurrence |
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthCheck", get(health_check))
        .route(
            "/ready",
            get(readiness_check::<BookingState, BookingAction, BookingEnvironment, BookingReducer>),
        )
        .route("/createMember", post(members::create_member))
        .route("/members/:mobile_number", get(members::get_member))
        .route("/classes", post(classes::create_classes))
        .route("/classes/:class_name/:date", get(classes::get_class))
        .route("/bookings", post(bookings::create_booking))
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
