//! # Classbook Runtime
//!
//! The Store: owns domain state and runs a reducer against it, one action
//! at a time.
//!
//! ## Core Components
//!
//! - **Store**: holds state behind a `RwLock`; `send` runs the reducer under
//!   the write lock so each action is an atomic critical section
//! - **Outcome broadcast**: every action a reducer emits is returned to the
//!   caller and published to subscribers in the order it was produced
//! - **Health**: a [`HealthCheck`] describing whether the store accepts work
//!
//! ## Example
//!
//! ```ignore
//! use classbook_runtime::Store;
//!
//! let store = Store::new(BookingState::default(), BookingReducer::new(), environment);
//!
//! let outcomes = store.send(BookingAction::RegisterMember { name, mobile_number }).await?;
//! let members = store.state(|s| s.members.len()).await;
//! ```

use classbook_core::{effect::Effect, reducer::Reducer};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after [`Store::shutdown`](super::Store::shutdown).
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Health check status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,

    /// Component is not operational
    Unhealthy,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Extra facts about the component
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Default capacity of the outcome broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Effect, HealthCheck, Ordering, Reducer, RwLock, StoreError};
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Outcome delivery (return value of `send` plus a broadcast channel)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        /// Every action emitted by the reducer, in emission order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The outcome broadcast channel holds
        /// [`DEFAULT_BROADCAST_CAPACITY`](super::DEFAULT_BROADCAST_CAPACITY)
        /// actions; see [`Store::with_broadcast_capacity`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(
                initial_state,
                reducer,
                environment,
                super::DEFAULT_BROADCAST_CAPACITY,
            )
        }

        /// Create a store with a custom outcome broadcast capacity
        ///
        /// Subscribers that fall more than `capacity` actions behind lose
        /// the oldest ones. Callers of `send` are never affected.
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Publishes every emitted action to subscribers
        /// 4. Returns the emitted actions to the caller
        ///
        /// Concurrent calls serialize on the write lock, so two actions never
        /// observe each other's partial updates.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<Vec<A>, StoreError> {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut *state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            let emitted: Vec<A> = effects.into_iter().filter_map(Effect::into_emitted).collect();

            // Published before the lock is released so subscribers see
            // outcomes in the same order the reducer produced them.
            for action in &emitted {
                // No subscribers is not an error
                let _ = self.action_broadcast.send(action.clone());
            }
            drop(state);

            tracing::debug!(emitted = emitted.len(), "Action processed");
            Ok(emitted)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let member_count = store.state(|s| s.members.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action the reducer emits from now on
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Current health of the store
        ///
        /// Unhealthy once shutdown has begun.
        #[must_use]
        pub fn health(&self) -> HealthCheck {
            let check = if self.is_shutting_down() {
                HealthCheck::unhealthy("store", "Store is shutting down")
            } else {
                HealthCheck::healthy("store")
            };

            check.with_metadata(
                "subscribers",
                self.action_broadcast.receiver_count().to_string(),
            )
        }

        /// Stop accepting actions
        ///
        /// Actions already holding the lock finish normally; every later
        /// `send` fails with [`StoreError::ShutdownInProgress`].
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::info!("Store shutdown initiated");
                metrics::counter!("store.shutdown.initiated").increment(1);
            }
        }

        /// True once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
