//! Booking actions: commands sent by callers and the outcomes the reducer
//! emits in reply.

use super::error::BookingError;
use super::schedule::{DateRange, ScheduleOutcome};
use super::types::{Booking, Capacity, ClassName, Member, MemberName, MobileNumber};
use chrono::NaiveDate;

/// Inputs and outputs of [`BookingReducer`](super::BookingReducer).
///
/// Commands carry already-validated values. Each command produces exactly
/// one outcome action; outcomes fed back into the reducer change nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BookingAction {
    // ===== Commands =====
    /// Register a new member
    RegisterMember {
        /// Display name
        name: MemberName,
        /// Identity of the new member
        mobile_number: MobileNumber,
    },

    /// Create one occurrence of a class per day in a range
    ScheduleClasses {
        /// Class to schedule
        class_name: ClassName,
        /// Days to cover
        range: DateRange,
        /// Seats per occurrence
        capacity: Capacity,
    },

    /// Book a member into one class occurrence
    BookClass {
        /// Booking member
        mobile_number: MobileNumber,
        /// Class to book
        class_name: ClassName,
        /// Day of the occurrence
        date: NaiveDate,
    },

    // ===== Outcomes =====
    /// A member was registered
    MemberRegistered {
        /// The stored member
        member: Member,
    },

    /// A schedule request was applied day by day
    ClassesScheduled {
        /// Scheduled class
        class_name: ClassName,
        /// Days created and days skipped
        outcome: ScheduleOutcome,
    },

    /// A booking was recorded
    ClassBooked {
        /// The stored booking
        booking: Booking,
    },

    /// A command was refused; state is unchanged
    Rejected {
        /// Why the command was refused
        error: BookingError,
    },
}

impl BookingAction {
    /// True for actions the reducer emits rather than accepts as commands
    #[must_use]
    pub const fn is_outcome(&self) -> bool {
        matches!(
            self,
            Self::MemberRegistered { .. }
                | Self::ClassesScheduled { .. }
                | Self::ClassBooked { .. }
                | Self::Rejected { .. }
        )
    }

    /// Short name used in logs and metrics labels
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RegisterMember { .. } => "register_member",
            Self::ScheduleClasses { .. } => "schedule_classes",
            Self::BookClass { .. } => "book_class",
            Self::MemberRegistered { .. } => "member_registered",
            Self::ClassesScheduled { .. } => "classes_scheduled",
            Self::ClassBooked { .. } => "class_booked",
            Self::Rejected { .. } => "rejected",
        }
    }
}
