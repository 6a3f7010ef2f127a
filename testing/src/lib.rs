//! # Classbook Testing
//!
//! Testing utilities for Classbook reducers and stores.
//!
//! This crate provides:
//! - [`FixedClock`], a deterministic [`Clock`]
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Booking fixtures: an environment and pre-validated domain values
//!
//! ## Example
//!
//! ```
//! use classbook_core::booking::{BookingAction, BookingReducer, BookingState};
//! use classbook_testing::{ReducerTest, assertions, fixtures};
//!
//! ReducerTest::new(BookingReducer::new())
//!     .with_env(fixtures::booking_env())
//!     .given_state(BookingState::default())
//!     .when_action(fixtures::register("Ann", "555-0100"))
//!     .then_state(|state| assert_eq!(state.members.len(), 1))
//!     .then_effects(|effects| {
//!         let outcomes = assertions::emitted_actions(effects);
//!         assert!(matches!(outcomes[..], [BookingAction::MemberRegistered { .. }]));
//!     })
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use classbook_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use classbook_testing::mocks::FixedClock;
    /// use classbook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Never in practice; the timestamp is a literal.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Ready-made booking values for tests
///
/// Every helper panics on invalid input, so tests can write plain string
/// literals.
#[allow(clippy::expect_used, clippy::missing_panics_doc)]
pub mod fixtures {
    use super::mocks::test_clock;
    use classbook_core::booking::{
        BookingAction, BookingEnvironment, Capacity, ClassName, DateRange, MemberName,
        MobileNumber, parse_date,
    };
    use classbook_core::NaiveDate;
    use std::sync::Arc;

    /// Environment with the fixed test clock and no span limit
    #[must_use]
    pub fn booking_env() -> BookingEnvironment {
        BookingEnvironment::new(Arc::new(test_clock()), None)
    }

    /// Parse a `YYYY-MM-DD` literal
    #[must_use]
    pub fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("fixture date must be YYYY-MM-DD")
    }

    /// Validated mobile number
    #[must_use]
    pub fn mobile(value: &str) -> MobileNumber {
        MobileNumber::parse(value).expect("fixture mobile number must not be blank")
    }

    /// Validated class name
    #[must_use]
    pub fn class_name(value: &str) -> ClassName {
        ClassName::parse(value).expect("fixture class name must not be blank")
    }

    /// `RegisterMember` command
    #[must_use]
    pub fn register(name: &str, mobile_number: &str) -> BookingAction {
        BookingAction::RegisterMember {
            name: MemberName::parse(name).expect("fixture name must not be blank"),
            mobile_number: mobile(mobile_number),
        }
    }

    /// `ScheduleClasses` command
    #[must_use]
    pub fn schedule(class: &str, from: &str, to: &str, capacity: u32) -> BookingAction {
        BookingAction::ScheduleClasses {
            class_name: class_name(class),
            range: DateRange::parse(from, to).expect("fixture range must be ordered"),
            capacity: Capacity::new(capacity).expect("fixture capacity must be positive"),
        }
    }

    /// `BookClass` command
    #[must_use]
    pub fn book(mobile_number: &str, class: &str, on: &str) -> BookingAction {
        BookingAction::BookClass {
            mobile_number: mobile(mobile_number),
            class_name: class_name(class),
            date: date(on),
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
