//! Errors produced by the booking domain.

use super::types::{ClassName, MobileNumber};
use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong while registering, scheduling or booking.
///
/// Errors are values: the reducer emits them inside
/// [`BookingAction::Rejected`](super::BookingAction::Rejected) rather than
/// failing the store, so they are `Clone` and comparable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A required text field was missing or blank
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the field
        field: &'static str,
    },

    /// A date was not a calendar date in `YYYY-MM-DD` form
    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// `toDate` lies before `fromDate`
    #[error("toDate {to} is before fromDate {from}")]
    InvalidRange {
        /// First day requested
        from: NaiveDate,
        /// Last day requested
        to: NaiveDate,
    },

    /// The range spans more days than the configured limit
    #[error("date range spans {days} days, the limit is {limit}")]
    RangeTooLong {
        /// `toDate - fromDate` in days
        days: i64,
        /// Configured maximum span
        limit: u32,
    },

    /// Capacity was zero, negative or too large
    #[error("capacity must be a positive integer, got {0}")]
    InvalidCapacity(i64),

    /// A member with this mobile number is already registered
    #[error("member with mobile number {0} already exists")]
    MemberExists(MobileNumber),

    /// No occurrence of the class is scheduled on the date
    #[error("class {class_name} does not exist on {date}")]
    ClassNotFound {
        /// Requested class
        class_name: ClassName,
        /// Requested day
        date: NaiveDate,
    },

    /// No member is registered under the mobile number
    #[error("member with mobile number {0} does not exist")]
    MemberNotFound(MobileNumber),

    /// The member already holds a booking for this occurrence
    #[error("member {mobile_number} has already booked {class_name} on {date}")]
    AlreadyBooked {
        /// Booking member
        mobile_number: MobileNumber,
        /// Booked class
        class_name: ClassName,
        /// Booked day
        date: NaiveDate,
    },
}

/// Coarse classification used by transports to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; nothing was mutated
    Validation,
    /// Uniqueness invariant would be violated
    Conflict,
    /// A referenced member or class occurrence is missing
    NotFound,
}

impl BookingError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidRange { .. }
            | Self::RangeTooLong { .. }
            | Self::InvalidCapacity(_) => ErrorKind::Validation,
            Self::MemberExists(_) | Self::AlreadyBooked { .. } => ErrorKind::Conflict,
            Self::ClassNotFound { .. } | Self::MemberNotFound(_) => ErrorKind::NotFound,
        }
    }
}
