//! Booking endpoint.
//!
//! - `POST /bookings`: book a member into one class occurrence

use super::{dispatch, unexpected_outcome};
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, NaiveDate, Utc};
use classbook_core::booking::{Booking, BookingAction, ClassName, MobileNumber, parse_date};
use classbook_web::{CorrelationId, ValidJson, WebResult};
use serde::{Deserialize, Serialize};

/// Request to book a class occurrence.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Class name
    pub class_name: String,
    /// Booking member
    pub mobile_number: String,
    /// Accepted for compatibility; the registered name is stored instead
    pub name: Option<String>,
    /// Day of the occurrence, `YYYY-MM-DD`
    pub date: String,
}

/// A stored booking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// Booked class
    pub class_name: String,
    /// Booking member
    pub mobile_number: String,
    /// Member name at booking time
    pub name: String,
    /// Day of the occurrence
    pub date: NaiveDate,
    /// When the booking was made
    pub booked_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            class_name: booking.class_name.to_string(),
            mobile_number: booking.mobile_number.to_string(),
            name: booking.member_name.to_string(),
            date: booking.date,
            booked_at: booking.booked_at,
        }
    }
}

/// Response after booking.
#[derive(Debug, Serialize)]
pub struct CreateBookingResponse {
    /// Success message
    pub message: &'static str,
    /// The stored booking
    pub booking: BookingResponse,
}

/// Book a member into a class occurrence.
///
/// # Errors
///
/// - 400 for a blank class name or mobile number, or a bad date
/// - 404 if the class is not scheduled that day, or the member is unknown
///   (class is checked first)
/// - 409 if the member already booked this occurrence
pub async fn create_booking(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    ValidJson(request): ValidJson<CreateBookingRequest>,
) -> WebResult<(StatusCode, Json<CreateBookingResponse>)> {
    let command = BookingAction::BookClass {
        class_name: ClassName::parse(request.class_name)?,
        mobile_number: MobileNumber::parse(request.mobile_number)?,
        date: parse_date(&request.date)?,
    };

    if let Some(name) = request.name.as_deref() {
        tracing::debug!(name, "Ignoring name supplied with booking");
    }

    match dispatch(&state.store, correlation_id, command).await? {
        BookingAction::ClassBooked { booking } => Ok((
            StatusCode::CREATED,
            Json(CreateBookingResponse {
                message: "You have successfully booked for the class",
                booking: booking.into(),
            }),
        )),
        other => Err(unexpected_outcome(&other)),
    }
}
