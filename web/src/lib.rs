//! Axum integration for Classbook.
//!
//! The HTTP layer is a thin imperative shell around the booking reducer:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, status codes
//! │  - Request parsing (ValidJson)          │  ← Correlation IDs, tracing
//! │  - Response serialization (AppError)    │
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - BookingReducer inside the Store      │  ← Atomic per action
//! │  - Outcome actions as return values     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **Extract** the body with [`ValidJson`] (malformed input → 400)
//! 2. **Validate** fields into domain values
//! 3. **Dispatch** a command through `Store::send`
//! 4. **Map** the emitted outcome to a response, or a
//!    [`BookingError`](classbook_core::booking::BookingError) to an [`AppError`]

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, ValidJson};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
