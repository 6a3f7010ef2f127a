//! Date-range expansion: one class occurrence per calendar day.

use super::error::BookingError;
use super::registry::ClassCatalog;
use super::types::{Capacity, ClassName, ClassOccurrence, parse_date};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// An inclusive range of calendar days, `from <= to`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates
    ///
    /// # Errors
    ///
    /// [`BookingError::InvalidRange`] when `to` is before `from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, BookingError> {
        if to < from {
            return Err(BookingError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Parse both ends as `YYYY-MM-DD` and build the range
    ///
    /// # Errors
    ///
    /// [`BookingError::InvalidDate`] if either end does not parse (the
    /// start is checked first), otherwise the errors of [`DateRange::new`].
    pub fn parse(from: &str, to: &str) -> Result<Self, BookingError> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        Self::new(from, to)
    }

    /// First day
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// `to - from` in whole days
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Number of days covered, both ends included
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // span is never negative
    pub fn len(&self) -> usize {
        self.span_days() as usize + 1
    }

    /// A range always covers at least one day
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Every day in the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.from.iter_days().take(self.len())
    }
}

/// Per-day result of a schedule request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleOutcome {
    /// Days that received a new occurrence
    pub created: Vec<NaiveDate>,
    /// Days that already had an occurrence and were left untouched
    pub skipped: Vec<NaiveDate>,
}

impl ScheduleOutcome {
    /// True when nothing new was scheduled
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Create one occurrence of `class_name` per day of `range`.
///
/// Each day is independent: days already present in the catalog are
/// reported as skipped and keep their original occurrence, the rest are
/// inserted. The result lists both.
pub fn expand_and_create(
    catalog: &mut ClassCatalog,
    class_name: &ClassName,
    range: DateRange,
    capacity: Capacity,
    scheduled_at: DateTime<Utc>,
) -> ScheduleOutcome {
    let mut outcome = ScheduleOutcome::default();

    for date in range.days() {
        let occurrence = ClassOccurrence::new(class_name.clone(), date, capacity, scheduled_at);

        if catalog.insert_if_absent(occurrence) {
            outcome.created.push(date);
        } else {
            outcome.skipped.push(date);
        }
    }

    tracing::debug!(
        class_name = %class_name,
        created = outcome.created.len(),
        skipped = outcome.skipped.len(),
        "Expanded schedule"
    );

    outcome
}
