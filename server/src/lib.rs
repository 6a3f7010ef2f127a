//! Classbook HTTP service.
//!
//! Members register with a mobile number, classes are scheduled one
//! occurrence per day across a date range, and members book a seat in one
//! occurrence. All three operations run through a single [`BookingStore`].

use classbook_core::booking::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
use classbook_core::environment::SystemClock;
use classbook_runtime::Store;
use std::sync::Arc;

pub mod api;
pub mod audit;
pub mod config;
pub mod server;

/// The store holding every member, class occurrence and booking
pub type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;

/// Build an empty store configured from `config`, using wall-clock time
#[must_use]
pub fn build_store(config: &config::Config) -> Arc<BookingStore> {
    let environment =
        BookingEnvironment::new(Arc::new(SystemClock), config.booking.max_schedule_days);

    Arc::new(Store::with_broadcast_capacity(
        BookingState::default(),
        BookingReducer::new(),
        environment,
        config.booking.broadcast_capacity,
    ))
}
