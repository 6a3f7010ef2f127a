//! HTTP API endpoints.
//!
//! Each handler validates its request into domain values, sends one command
//! through the store and maps the single outcome action to a response.

use crate::BookingStore;
use classbook_core::booking::BookingAction;
use classbook_web::{AppError, CorrelationId, WebResult};

pub mod bookings;
pub mod classes;
pub mod members;

/// Send a command and return its outcome.
///
/// A `Rejected` outcome becomes the matching [`AppError`].
///
/// # Errors
///
/// - the rejection carried by the outcome
/// - 503 if the store is shutting down
/// - 500 if the reducer emitted nothing
pub(crate) async fn dispatch(
    store: &BookingStore,
    CorrelationId(correlation_id): CorrelationId,
    command: BookingAction,
) -> WebResult<BookingAction> {
    let command_name = command.name();
    tracing::info!(%correlation_id, command = command_name, "Dispatching command");

    let outcome = store
        .send(command)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            tracing::error!(%correlation_id, command = command_name, "Command produced no outcome");
            AppError::internal("Command produced no outcome")
        })?;

    match outcome {
        BookingAction::Rejected { error } => Err(error.into()),
        outcome => Ok(outcome),
    }
}

/// Build the error for an outcome that does not answer the command sent.
pub(crate) fn unexpected_outcome(outcome: &BookingAction) -> AppError {
    tracing::error!(outcome = outcome.name(), "Unexpected outcome");
    AppError::internal("Unexpected outcome")
}
