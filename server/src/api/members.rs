//! Member endpoints.
//!
//! - `POST /createMember`: register a member
//! - `GET /members/:mobileNumber`: look one up

use super::{dispatch, unexpected_outcome};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use classbook_core::booking::{BookingAction, Member, MemberName, MobileNumber};
use classbook_web::{AppError, CorrelationId, ValidJson, WebResult};
use serde::{Deserialize, Serialize};

/// Request to register a member.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateMemberRequest {
    /// Display name
    pub name: String,
    /// Mobile number, the member's identity
    pub mobile_number: String,
}

/// Response after registering a member.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberResponse {
    /// Success message
    pub message: &'static str,
    /// Registered name
    pub name: String,
    /// Registered mobile number
    pub mobile_number: String,
    /// Always true for a new member
    pub active: bool,
}

/// Member details.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    /// Display name
    pub name: String,
    /// Mobile number
    pub mobile_number: String,
    /// Active flag
    pub active: bool,
    /// Registration time
    pub registered_at: DateTime<Utc>,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.to_string(),
            mobile_number: member.mobile_number.to_string(),
            active: member.active,
            registered_at: member.registered_at,
        }
    }
}

/// Register a member.
///
/// # Errors
///
/// - 400 if `name` or `mobileNumber` is missing or blank
/// - 409 if the mobile number is already registered
pub async fn create_member(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    ValidJson(request): ValidJson<CreateMemberRequest>,
) -> WebResult<(StatusCode, Json<CreateMemberResponse>)> {
    let command = BookingAction::RegisterMember {
        name: MemberName::parse(request.name)?,
        mobile_number: MobileNumber::parse(request.mobile_number)?,
    };

    match dispatch(&state.store, correlation_id, command).await? {
        BookingAction::MemberRegistered { member } => Ok((
            StatusCode::CREATED,
            Json(CreateMemberResponse {
                message: "Successfully Registered Member",
                name: member.name.to_string(),
                mobile_number: member.mobile_number.to_string(),
                active: member.active,
            }),
        )),
        other => Err(unexpected_outcome(&other)),
    }
}

/// Look up a member by mobile number.
///
/// # Errors
///
/// - 404 if nobody holds the number
pub async fn get_member(
    State(state): State<AppState>,
    Path(mobile_number): Path<String>,
) -> WebResult<Json<MemberResponse>> {
    let mobile_number = MobileNumber::parse(mobile_number)?;

    state
        .store
        .state(|s| s.members.get(&mobile_number).map(MemberResponse::from))
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("Member", &mobile_number))
}
