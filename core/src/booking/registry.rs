//! Keyed in-memory registries for members, class occurrences and bookings.
//!
//! Each registry enforces its own uniqueness invariant through a single
//! `HashMap` entry lookup, so a duplicate key can never be inserted even if
//! the caller skipped an `exists` check.

use super::error::BookingError;
use super::types::{Booking, BookingKey, ClassKey, ClassName, ClassOccurrence, Member, MobileNumber};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

// ============================================================================
// MemberRegistry
// ============================================================================

/// Members keyed by mobile number
#[derive(Clone, Debug, Default)]
pub struct MemberRegistry {
    members: HashMap<MobileNumber, Member>,
}

impl MemberRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member, marking them active.
    ///
    /// # Errors
    ///
    /// [`BookingError::MemberExists`] when the mobile number is taken; the
    /// existing member is left untouched.
    pub fn register(&mut self, mut member: Member) -> Result<Member, BookingError> {
        match self.members.entry(member.mobile_number.clone()) {
            Entry::Occupied(_) => Err(BookingError::MemberExists(member.mobile_number)),
            Entry::Vacant(slot) => {
                member.active = true;
                Ok(slot.insert(member).clone())
            },
        }
    }

    /// True when a member holds this mobile number
    #[must_use]
    pub fn exists(&self, mobile_number: &MobileNumber) -> bool {
        self.members.contains_key(mobile_number)
    }

    /// Look up a member
    #[must_use]
    pub fn get(&self, mobile_number: &MobileNumber) -> Option<&Member> {
        self.members.get(mobile_number)
    }

    /// Number of registered members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when nobody is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// ============================================================================
// ClassCatalog
// ============================================================================

/// Class occurrences keyed by `(class name, date)`
#[derive(Clone, Debug, Default)]
pub struct ClassCatalog {
    occurrences: HashMap<ClassKey, ClassOccurrence>,
}

impl ClassCatalog {
    /// Creates an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an occurrence unless its `(class name, date)` is taken.
    ///
    /// Returns `true` if inserted. An existing occurrence is never replaced.
    pub fn insert_if_absent(&mut self, occurrence: ClassOccurrence) -> bool {
        match self.occurrences.entry(occurrence.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(occurrence);
                true
            },
        }
    }

    /// True when the class is scheduled on that day
    #[must_use]
    pub fn contains(&self, key: &ClassKey) -> bool {
        self.occurrences.contains_key(key)
    }

    /// Look up an occurrence
    #[must_use]
    pub fn get(&self, key: &ClassKey) -> Option<&ClassOccurrence> {
        self.occurrences.get(key)
    }

    /// Number of occurrences across all classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// True when nothing is scheduled
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

// ============================================================================
// BookingLedger
// ============================================================================

/// Bookings keyed by `(mobile number, class name, date)`
#[derive(Clone, Debug, Default)]
pub struct BookingLedger {
    bookings: HashMap<BookingKey, Booking>,
    per_class: HashMap<ClassKey, usize>,
}

impl BookingLedger {
    /// Creates an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a member into a class occurrence.
    ///
    /// Checks run in a fixed order and the first failure wins: the
    /// occurrence must exist, then the member, then the booking must be
    /// new. Capacity is not consulted. The member's current name is
    /// copied onto the booking.
    ///
    /// # Errors
    ///
    /// - [`BookingError::ClassNotFound`]
    /// - [`BookingError::MemberNotFound`]
    /// - [`BookingError::AlreadyBooked`]
    pub fn book(
        &mut self,
        members: &MemberRegistry,
        catalog: &ClassCatalog,
        mobile_number: MobileNumber,
        class_name: ClassName,
        date: NaiveDate,
        booked_at: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let class = ClassKey::new(class_name, date);
        if !catalog.contains(&class) {
            return Err(BookingError::ClassNotFound {
                class_name: class.class_name,
                date,
            });
        }

        let Some(member) = members.get(&mobile_number) else {
            return Err(BookingError::MemberNotFound(mobile_number));
        };
        let member_name = member.name.clone();

        match self.bookings.entry(BookingKey::new(mobile_number, class)) {
            Entry::Occupied(slot) => {
                let key = slot.key();
                Err(BookingError::AlreadyBooked {
                    mobile_number: key.mobile_number.clone(),
                    class_name: key.class.class_name.clone(),
                    date,
                })
            },
            Entry::Vacant(slot) => {
                let key = slot.key();
                let class = key.class.clone();
                let booking = Booking {
                    class_name: key.class.class_name.clone(),
                    mobile_number: key.mobile_number.clone(),
                    member_name,
                    date,
                    booked_at,
                };
                let booking = slot.insert(booking).clone();
                *self.per_class.entry(class).or_default() += 1;
                Ok(booking)
            },
        }
    }

    /// True when the booking exists
    #[must_use]
    pub fn contains(&self, key: &BookingKey) -> bool {
        self.bookings.contains_key(key)
    }

    /// Look up a booking
    #[must_use]
    pub fn get(&self, key: &BookingKey) -> Option<&Booking> {
        self.bookings.get(key)
    }

    /// Number of bookings made for one class occurrence
    #[must_use]
    pub fn count_for_class(&self, class: &ClassKey) -> usize {
        self.per_class.get(class).copied().unwrap_or(0)
    }

    /// Total number of bookings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// True when nothing is booked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
