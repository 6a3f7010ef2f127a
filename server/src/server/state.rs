//! Application state for the Classbook HTTP server.

use crate::BookingStore;
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the store itself is shared through an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Members, class occurrences and bookings
    pub store: Arc<BookingStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(store: Arc<BookingStore>) -> Self {
        Self { store }
    }
}

/// Lets store-generic handlers such as `readiness_check` extract the store.
impl FromRef<AppState> for Arc<BookingStore> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.store)
    }
}
