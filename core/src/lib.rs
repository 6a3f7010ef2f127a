//! # Classbook Core
//!
//! Core traits and the class booking domain for Classbook.
//!
//! The crate is split in two halves:
//!
//! - The **architecture** modules ([`reducer`], [`effect`], [`environment`])
//!   define the Reducer pattern the runtime executes.
//! - The [`booking`] module is the domain: members, class occurrences,
//!   bookings, and the reducer that keeps them consistent.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by the runtime `Store`
//! - **Action**: All possible inputs to a reducer (commands and their outcomes)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of what the runtime should do next
//! - **Environment**: Injected dependencies (clock, limits)
//!
//! ## Example
//!
//! ```
//! use classbook_core::booking::{
//!     BookingAction, BookingEnvironment, BookingReducer, BookingState, MemberName, MobileNumber,
//! };
//! use classbook_core::environment::SystemClock;
//! use classbook_core::reducer::Reducer;
//! use std::sync::Arc;
//!
//! let env = BookingEnvironment::new(Arc::new(SystemClock), None);
//! let mut state = BookingState::default();
//!
//! let effects = BookingReducer::new().reduce(
//!     &mut state,
//!     BookingAction::RegisterMember {
//!         name: MemberName::parse("Ann").unwrap(),
//!         mobile_number: MobileNumber::parse("555-0100").unwrap(),
//!     },
//!     &env,
//! );
//!
//! assert_eq!(effects.len(), 1);
//! assert_eq!(state.members.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod booking;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// The runtime calls `reduce` while holding exclusive access to the
    /// state, so every check-then-insert sequence inside one call is atomic
    /// with respect to every other call.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe what the runtime should do after a reducer call.
/// They are values, not execution.
pub mod effect {
    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Hand an action back to the caller and broadcast it to observers.
        ///
        /// Outcome actions (e.g. "member registered", "command rejected")
        /// travel this way so request/response callers learn what happened
        /// to their command.
        Emit(Action),
    }

    impl<Action> Effect<Action> {
        /// Returns the emitted action, if this effect carries one
        #[must_use]
        pub fn into_emitted(self) -> Option<Action> {
            match self {
                Self::None => None,
                Self::Emit(action) => Some(action),
            }
        }

        /// Returns a reference to the emitted action, if any
        #[must_use]
        pub const fn emitted(&self) -> Option<&Action> {
            match self {
                Self::None => None,
                Self::Emit(action) => Some(action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Production code uses [`SystemClock`]; tests use a fixed clock so
    /// timestamps recorded on members and bookings are deterministic.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
