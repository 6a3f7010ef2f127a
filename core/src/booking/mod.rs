//! Class booking domain.
//!
//! Three keyed registries hold the data:
//!
//! | Registry | Key | Holds |
//! |---|---|---|
//! | [`MemberRegistry`] | [`MobileNumber`] | [`Member`] |
//! | [`ClassCatalog`] | [`ClassKey`] `(class name, date)` | [`ClassOccurrence`] |
//! | [`BookingLedger`] | [`BookingKey`] `(mobile, class name, date)` | [`Booking`] |
//!
//! [`schedule::expand_and_create`] materializes one occurrence per day of a
//! [`DateRange`], and [`BookingReducer`] drives all three registries from
//! [`BookingAction`] commands.

pub mod actions;
pub mod error;
pub mod reducer;
pub mod registry;
pub mod schedule;
pub mod types;

pub use actions::BookingAction;
pub use error::{BookingError, ErrorKind};
pub use reducer::{BookingEnvironment, BookingReducer, BookingState};
pub use registry::{BookingLedger, ClassCatalog, MemberRegistry};
pub use schedule::{DateRange, ScheduleOutcome};
pub use types::{
    Booking, BookingKey, Capacity, ClassKey, ClassName, ClassOccurrence, ISO_DATE_FORMAT, Member,
    MemberName, MobileNumber, parse_date,
};
