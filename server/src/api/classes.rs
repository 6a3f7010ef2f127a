//! Class scheduling endpoints.
//!
//! - `POST /classes`: schedule one occurrence per day of a date range
//! - `GET /classes/:className/:date`: look up one occurrence

use super::{dispatch, unexpected_outcome};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use classbook_core::booking::{
    BookingAction, BookingError, Capacity, ClassKey, ClassName, DateRange, ScheduleOutcome,
    parse_date,
};
use classbook_web::{AppError, CorrelationId, ValidJson, WebResult};
use serde::{Deserialize, Serialize};

/// Request to schedule a class over a date range.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateClassesRequest {
    /// Class name
    pub class_name: String,
    /// First day, `YYYY-MM-DD`
    pub from_date: String,
    /// Last day, `YYYY-MM-DD`, inclusive
    pub to_date: String,
    /// Seats per occurrence
    pub capacity: Option<i64>,
}

/// Days that received a new occurrence.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBlock {
    /// Always 201
    pub status: u16,
    /// New occurrence dates
    pub created_dates: Vec<NaiveDate>,
    /// Empty when nothing was created
    pub message: &'static str,
}

/// Days that were already scheduled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedBlock {
    /// Always 409
    pub status: u16,
    /// Dates left untouched
    pub skipped_dates: Vec<NaiveDate>,
    /// Empty when nothing was skipped
    pub message: &'static str,
}

/// Multi-status response for a schedule request.
///
/// Both blocks are always present; either list may be empty.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassesResponse {
    /// Created days
    pub success_status: CreatedBlock,
    /// Skipped days
    pub failure_status: SkippedBlock,
}

impl From<ScheduleOutcome> for CreateClassesResponse {
    fn from(outcome: ScheduleOutcome) -> Self {
        let created_message = if outcome.created.is_empty() {
            ""
        } else {
            "classes are created for these dates"
        };
        let skipped_message = if outcome.skipped.is_empty() {
            ""
        } else {
            "classes are already exists on these dates"
        };

        Self {
            success_status: CreatedBlock {
                status: StatusCode::CREATED.as_u16(),
                created_dates: outcome.created,
                message: created_message,
            },
            failure_status: SkippedBlock {
                status: StatusCode::CONFLICT.as_u16(),
                skipped_dates: outcome.skipped,
                message: skipped_message,
            },
        }
    }
}

/// One class occurrence with its current number of bookings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassResponse {
    /// Class name
    pub class_name: String,
    /// Day of the occurrence
    pub date: NaiveDate,
    /// Seats offered
    pub capacity: u32,
    /// Active flag
    pub active: bool,
    /// When the occurrence was created
    pub scheduled_at: DateTime<Utc>,
    /// Bookings recorded so far
    pub bookings: usize,
}

/// Schedule a class for every day in `[fromDate, toDate]`.
///
/// Days already scheduled are skipped, not replaced; the response is
/// always 207 and lists both groups.
///
/// # Errors
///
/// - 400 for a blank class name, a bad date, `toDate` before `fromDate`, a
///   range over the configured limit, or a missing or non-positive capacity
pub async fn create_classes(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    ValidJson(request): ValidJson<CreateClassesRequest>,
) -> WebResult<(StatusCode, Json<CreateClassesResponse>)> {
    let class_name = ClassName::parse(request.class_name)?;
    let range = DateRange::parse(&request.from_date, &request.to_date)?;
    let capacity = request
        .capacity
        .ok_or(BookingError::MissingField { field: "capacity" })
        .and_then(Capacity::try_from)?;

    let command = BookingAction::ScheduleClasses {
        class_name,
        range,
        capacity,
    };

    match dispatch(&state.store, correlation_id, command).await? {
        BookingAction::ClassesScheduled { outcome, .. } => {
            Ok((StatusCode::MULTI_STATUS, Json(outcome.into())))
        },
        other => Err(unexpected_outcome(&other)),
    }
}

/// Look up the occurrence of a class on one day.
///
/// # Errors
///
/// - 400 if `date` is not `YYYY-MM-DD`
/// - 404 if the class is not scheduled that day
pub async fn get_class(
    State(state): State<AppState>,
    Path((class_name, date)): Path<(String, String)>,
) -> WebResult<Json<ClassResponse>> {
    let key = ClassKey::new(ClassName::parse(class_name)?, parse_date(&date)?);

    let found = state
        .store
        .state(|s| {
            s.catalog.get(&key).map(|occurrence| ClassResponse {
                class_name: occurrence.class_name.to_string(),
                date: occurrence.date,
                capacity: occurrence.capacity.get(),
                active: occurrence.active,
                scheduled_at: occurrence.scheduled_at,
                bookings: s.ledger.count_for_class(&key),
            })
        })
        .await;

    found
        .map(Json)
        .ok_or_else(|| AppError::not_found("Class", &key))
}
