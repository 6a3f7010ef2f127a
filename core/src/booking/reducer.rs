//! The booking reducer: validates commands against the three registries and
//! answers each with one outcome action.

use super::actions::BookingAction;
use super::error::BookingError;
use super::registry::{BookingLedger, ClassCatalog, MemberRegistry};
use super::schedule::{self, DateRange};
use super::types::Member;
use crate::effect::Effect;
use crate::environment::Clock;
use crate::reducer::Reducer;
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;

/// All booking data, owned by the store
#[derive(Clone, Debug, Default)]
pub struct BookingState {
    /// Registered members
    pub members: MemberRegistry,
    /// Scheduled class occurrences
    pub catalog: ClassCatalog,
    /// Recorded bookings
    pub ledger: BookingLedger,
}

/// Dependencies of [`BookingReducer`]
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Source of `registered_at`, `scheduled_at` and `booked_at`
    pub clock: Arc<dyn Clock>,
    /// Longest schedule span accepted, in days; `None` accepts any span
    pub max_schedule_days: Option<u32>,
}

impl BookingEnvironment {
    /// Creates a new environment
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, max_schedule_days: Option<u32>) -> Self {
        Self {
            clock,
            max_schedule_days,
        }
    }
}

impl std::fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingEnvironment")
            .field("max_schedule_days", &self.max_schedule_days)
            .finish_non_exhaustive()
    }
}

/// Reducer for members, class schedules and bookings
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn check_span(range: &DateRange, limit: Option<u32>) -> Result<(), BookingError> {
        let Some(limit) = limit else {
            return Ok(());
        };
        let days = range.span_days();
        if days > i64::from(limit) {
            return Err(BookingError::RangeTooLong { days, limit });
        }
        Ok(())
    }
}

fn reject(action: &'static str, error: BookingError) -> SmallVec<[Effect<BookingAction>; 4]> {
    tracing::warn!(action, kind = ?error.kind(), %error, "Command rejected");
    smallvec![Effect::Emit(BookingAction::Rejected { error })]
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::RegisterMember {
                name,
                mobile_number,
            } => {
                let member = Member::new(name, mobile_number, env.clock.now());
                match state.members.register(member) {
                    Ok(member) => {
                        tracing::info!(mobile_number = %member.mobile_number, "Member registered");
                        smallvec![Effect::Emit(BookingAction::MemberRegistered { member })]
                    },
                    Err(error) => reject("register_member", error),
                }
            },

            BookingAction::ScheduleClasses {
                class_name,
                range,
                capacity,
            } => {
                if let Err(error) = Self::check_span(&range, env.max_schedule_days) {
                    return reject("schedule_classes", error);
                }

                let outcome = schedule::expand_and_create(
                    &mut state.catalog,
                    &class_name,
                    range,
                    capacity,
                    env.clock.now(),
                );

                tracing::info!(
                    class_name = %class_name,
                    created = outcome.created.len(),
                    skipped = outcome.skipped.len(),
                    "Classes scheduled"
                );

                smallvec![Effect::Emit(BookingAction::ClassesScheduled {
                    class_name,
                    outcome,
                })]
            },

            BookingAction::BookClass {
                mobile_number,
                class_name,
                date,
            } => {
                let BookingState {
                    members,
                    catalog,
                    ledger,
                } = state;

                match ledger.book(
                    members,
                    catalog,
                    mobile_number,
                    class_name,
                    date,
                    env.clock.now(),
                ) {
                    Ok(booking) => {
                        tracing::info!(
                            mobile_number = %booking.mobile_number,
                            class_name = %booking.class_name,
                            date = %booking.date,
                            "Class booked"
                        );
                        smallvec![Effect::Emit(BookingAction::ClassBooked { booking })]
                    },
                    Err(error) => reject("book_class", error),
                }
            },

            // Outcomes are answers, not requests
            BookingAction::MemberRegistered { .. }
            | BookingAction::ClassesScheduled { .. }
            | BookingAction::ClassBooked { .. }
            | BookingAction::Rejected { .. } => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::booking::types::{
        BookingKey, Capacity, ClassKey, ClassName, MemberName, MobileNumber, parse_date,
    };
    use crate::environment::SystemClock;

    fn env(max_schedule_days: Option<u32>) -> BookingEnvironment {
        BookingEnvironment::new(Arc::new(SystemClock), max_schedule_days)
    }

    fn emitted(effects: SmallVec<[Effect<BookingAction>; 4]>) -> Vec<BookingAction> {
        effects.into_iter().filter_map(Effect::into_emitted).collect()
    }

    fn register(name: &str, number: &str) -> BookingAction {
        BookingAction::RegisterMember {
            name: MemberName::parse(name).unwrap(),
            mobile_number: MobileNumber::parse(number).unwrap(),
        }
    }

    fn schedule(class: &str, from: &str, to: &str) -> BookingAction {
        BookingAction::ScheduleClasses {
            class_name: ClassName::parse(class).unwrap(),
            range: DateRange::parse(from, to).unwrap(),
            capacity: Capacity::new(10).unwrap(),
        }
    }

    fn book(number: &str, class: &str, date: &str) -> BookingAction {
        BookingAction::BookClass {
            mobile_number: MobileNumber::parse(number).unwrap(),
            class_name: ClassName::parse(class).unwrap(),
            date: parse_date(date).unwrap(),
        }
    }

    #[test]
    fn test_every_command_emits_one_outcome() {
        let reducer = BookingReducer::new();
        let env = env(None);
        let mut state = BookingState::default();

        for action in [
            register("Ann", "555-0100"),
            register("Ann", "555-0100"),
            schedule("Yoga", "2024-01-10", "2024-01-12"),
            book("555-0100", "Yoga", "2024-01-10"),
            book("555-0100", "Yoga", "2024-01-10"),
            book("555-0199", "Yoga", "2024-01-10"),
        ] {
            let outcomes = emitted(reducer.reduce(&mut state, action, &env));
            assert_eq!(outcomes.len(), 1);
            assert!(outcomes[0].is_outcome());
        }
    }

    #[test]
    fn test_span_limit_rejects_without_mutation() {
        let reducer = BookingReducer::new();
        let mut state = BookingState::default();

        let outcomes = emitted(reducer.reduce(
            &mut state,
            schedule("Yoga", "2024-01-01", "2024-01-31"),
            &env(Some(7)),
        ));

        assert_eq!(
            outcomes,
            vec![BookingAction::Rejected {
                error: BookingError::RangeTooLong { days: 30, limit: 7 }
            }]
        );
        assert!(state.catalog.is_empty());
    }

    #[test]
    fn test_span_limit_is_inclusive() {
        let reducer = BookingReducer::new();
        let mut state = BookingState::default();

        let outcomes = emitted(reducer.reduce(
            &mut state,
            schedule("Yoga", "2024-01-01", "2024-01-08"),
            &env(Some(7)),
        ));

        assert!(matches!(outcomes[..], [BookingAction::ClassesScheduled { .. }]));
        assert_eq!(state.catalog.len(), 8);
    }

    #[test]
    fn test_no_span_limit_by_default() {
        let reducer = BookingReducer::new();
        let mut state = BookingState::default();

        let outcomes = emitted(reducer.reduce(
            &mut state,
            schedule("Yoga", "2024-01-01", "2025-06-30"),
            &env(None),
        ));

        assert!(matches!(outcomes[..], [BookingAction::ClassesScheduled { .. }]));
        assert_eq!(state.catalog.len(), 547);
    }

    #[test]
    fn test_booking_snapshots_member_name() {
        let reducer = BookingReducer::new();
        let env = env(None);
        let mut state = BookingState::default();

        reducer.reduce(&mut state, register("Ann", "555-0100"), &env);
        reducer.reduce(&mut state, schedule("Yoga", "2024-01-10", "2024-01-10"), &env);
        reducer.reduce(&mut state, book("555-0100", "Yoga", "2024-01-10"), &env);

        let key = BookingKey::new(
            MobileNumber::parse("555-0100").unwrap(),
            ClassKey::new(
                ClassName::parse("Yoga").unwrap(),
                parse_date("2024-01-10").unwrap(),
            ),
        );
        assert_eq!(state.ledger.get(&key).unwrap().member_name.as_str(), "Ann");
    }

    #[test]
    fn test_outcomes_are_inert() {
        let reducer = BookingReducer::new();
        let env = env(None);
        let mut state = BookingState::default();

        let outcome = emitted(reducer.reduce(&mut state, register("Ann", "555-0100"), &env));
        let before = state.members.len();

        let effects = reducer.reduce(&mut state, outcome[0].clone(), &env);
        assert_eq!(effects.as_slice(), &[Effect::None]);
        assert_eq!(state.members.len(), before);
    }
}
