//! Structured log of every domain outcome.
//!
//! Handlers only see the outcome of their own request; this task sees all
//! of them, in the order the store produced them.

use classbook_core::booking::BookingAction;
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;

/// Log each outcome received from the store's action broadcast until the
/// channel closes.
#[must_use]
pub fn spawn_outcome_logger(mut outcomes: Receiver<BookingAction>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match outcomes.recv().await {
                Ok(action) => log_outcome(&action),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Outcome log fell behind");
                },
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("Outcome log stopped");
    })
}

fn log_outcome(action: &BookingAction) {
    match action {
        BookingAction::MemberRegistered { member } => tracing::info!(
            target: "classbook::audit",
            mobile_number = %member.mobile_number,
            name = %member.name,
            "member.registered"
        ),
        BookingAction::ClassesScheduled {
            class_name,
            outcome,
        } => tracing::info!(
            target: "classbook::audit",
            class_name = %class_name,
            created = outcome.created.len(),
            skipped = outcome.skipped.len(),
            "classes.scheduled"
        ),
        BookingAction::ClassBooked { booking } => tracing::info!(
            target: "classbook::audit",
            mobile_number = %booking.mobile_number,
            class_name = %booking.class_name,
            date = %booking.date,
            "class.booked"
        ),
        BookingAction::Rejected { error } => tracing::info!(
            target: "classbook::audit",
            kind = ?error.kind(),
            %error,
            "command.rejected"
        ),
        other => tracing::debug!(action = other.name(), "Ignoring non-outcome action"),
    }
}
