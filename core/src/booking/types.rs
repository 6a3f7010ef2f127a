//! Domain types for class booking.
//!
//! Value objects validate on construction, so a `ClassName` or `Capacity`
//! held anywhere in the domain is already known to be well formed.

use super::error::BookingError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// The only date format accepted on any date field.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Value objects
// ============================================================================

fn non_blank(value: impl Into<String>, field: &'static str) -> Result<String, BookingError> {
    let value = value.into();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(BookingError::MissingField { field });
    }

    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Display name of a member
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemberName(String);

impl MemberName {
    /// Validate a member name (trimmed, non-empty)
    ///
    /// # Errors
    ///
    /// [`BookingError::MissingField`] when the name is blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, BookingError> {
        non_blank(value, "name").map(Self)
    }

    /// The name as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mobile number; the identity of a member
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate a mobile number (trimmed, non-empty)
    ///
    /// # Errors
    ///
    /// [`BookingError::MissingField`] when the number is blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, BookingError> {
        non_blank(value, "mobileNumber").map(Self)
    }

    /// The number as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a class, shared by all its occurrences
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    /// Validate a class name (trimmed, non-empty)
    ///
    /// # Errors
    ///
    /// [`BookingError::MissingField`] when the name is blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, BookingError> {
        non_blank(value, "className").map(Self)
    }

    /// The name as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seats offered by a class occurrence.
///
/// Stored on every occurrence; no booking decision consults it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Capacity(u32);

impl Capacity {
    /// Create a capacity from a positive seat count
    ///
    /// # Errors
    ///
    /// [`BookingError::InvalidCapacity`] when `seats` is zero.
    pub fn new(seats: u32) -> Result<Self, BookingError> {
        if seats == 0 {
            return Err(BookingError::InvalidCapacity(0));
        }
        Ok(Self(seats))
    }

    /// Number of seats
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Capacity {
    type Error = BookingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .filter(|seats| *seats > 0)
            .map(Self)
            .ok_or(BookingError::InvalidCapacity(value))
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a calendar date written exactly as `YYYY-MM-DD`.
///
/// chrono alone accepts unpadded fields such as `2024-3-1`; those are
/// rejected here.
///
/// # Errors
///
/// [`BookingError::InvalidDate`] for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    let well_shaped = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });

    if !well_shaped {
        return Err(BookingError::InvalidDate {
            value: value.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|_| BookingError::InvalidDate {
        value: value.to_string(),
    })
}

// ============================================================================
// Composite keys
// ============================================================================

/// Identity of a class occurrence: `(class name, date)`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassKey {
    /// Class name
    pub class_name: ClassName,
    /// Day of the occurrence
    pub date: NaiveDate,
}

impl ClassKey {
    /// Build a class key
    #[must_use]
    pub const fn new(class_name: ClassName, date: NaiveDate) -> Self {
        Self { class_name, date }
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.class_name, self.date)
    }
}

/// Identity of a booking: `(mobile number, class name, date)`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BookingKey {
    /// Booking member
    pub mobile_number: MobileNumber,
    /// Booked occurrence
    pub class: ClassKey,
}

impl BookingKey {
    /// Build a booking key
    #[must_use]
    pub const fn new(mobile_number: MobileNumber, class: ClassKey) -> Self {
        Self {
            mobile_number,
            class,
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A registered member
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Display name
    pub name: MemberName,
    /// Identity
    pub mobile_number: MobileNumber,
    /// Always true once registered
    pub active: bool,
    /// When the member registered
    pub registered_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new active member
    #[must_use]
    pub const fn new(
        name: MemberName,
        mobile_number: MobileNumber,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            mobile_number,
            active: true,
            registered_at,
        }
    }
}

/// One scheduled instance of a class on a given day
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassOccurrence {
    /// Class name
    pub class_name: ClassName,
    /// Day of the occurrence
    pub date: NaiveDate,
    /// Seats offered
    pub capacity: Capacity,
    /// Always true once scheduled
    pub active: bool,
    /// When the occurrence was created
    pub scheduled_at: DateTime<Utc>,
}

impl ClassOccurrence {
    /// Creates a new active occurrence
    #[must_use]
    pub const fn new(
        class_name: ClassName,
        date: NaiveDate,
        capacity: Capacity,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            class_name,
            date,
            capacity,
            active: true,
            scheduled_at,
        }
    }

    /// Composite key of this occurrence
    #[must_use]
    pub fn key(&self) -> ClassKey {
        ClassKey::new(self.class_name.clone(), self.date)
    }
}

/// A member's seat in one class occurrence
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// Booked class
    pub class_name: ClassName,
    /// Booking member
    pub mobile_number: MobileNumber,
    /// Member name copied from the registry when the booking was made
    pub member_name: MemberName,
    /// Day of the booked occurrence
    pub date: NaiveDate,
    /// When the booking was made
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Composite key of this booking
    #[must_use]
    pub fn key(&self) -> BookingKey {
        BookingKey::new(
            self.mobile_number.clone(),
            ClassKey::new(self.class_name.clone(), self.date),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_rejected() {
        assert_eq!(
            MemberName::parse("   "),
            Err(BookingError::MissingField { field: "name" })
        );
        assert_eq!(
            MobileNumber::parse(""),
            Err(BookingError::MissingField {
                field: "mobileNumber"
            })
        );
        assert_eq!(
            ClassName::parse("\t"),
            Err(BookingError::MissingField { field: "className" })
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(ClassName::parse("  Yoga ").unwrap().as_str(), "Yoga");
        assert_eq!(MobileNumber::parse("555-0100").unwrap().as_str(), "555-0100");
    }

    #[test]
    fn test_capacity_must_be_positive() {
        assert_eq!(Capacity::try_from(10_i64).unwrap().get(), 10);
        assert_eq!(Capacity::try_from(0_i64), Err(BookingError::InvalidCapacity(0)));
        assert_eq!(Capacity::try_from(-3_i64), Err(BookingError::InvalidCapacity(-3)));
        assert_eq!(
            Capacity::try_from(i64::from(u32::MAX) + 1),
            Err(BookingError::InvalidCapacity(i64::from(u32::MAX) + 1))
        );
        assert!(Capacity::new(0).is_err());
    }

    #[test]
    fn test_parse_date_accepts_iso() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for input in [
            "2024-3-1",
            "2024/03/01",
            "01-03-2024",
            "2024-03-01T00:00:00Z",
            "2023-02-29",
            "2024-13-01",
            "",
            "yesterday",
        ] {
            assert_eq!(
                parse_date(input),
                Err(BookingError::InvalidDate {
                    value: input.to_string()
                }),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_booking_key_matches_parts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let booking = Booking {
            class_name: ClassName::parse("Pilates").unwrap(),
            mobile_number: MobileNumber::parse("555-0100").unwrap(),
            member_name: MemberName::parse("Ann").unwrap(),
            date,
            booked_at: Utc::now(),
        };

        let key = booking.key();
        assert_eq!(key.mobile_number.as_str(), "555-0100");
        assert_eq!(key.class, ClassKey::new(ClassName::parse("Pilates").unwrap(), date));
    }

    #[test]
    fn test_keys_do_not_collide_on_delimiters() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let tricky = ClassKey::new(ClassName::parse("Yoga#2024-03-01").unwrap(), date);
        let plain = ClassKey::new(ClassName::parse("Yoga").unwrap(), date);
        assert_ne!(tricky, plain);
    }
}
