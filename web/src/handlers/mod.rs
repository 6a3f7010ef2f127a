//! HTTP handlers shared by every Classbook service.

pub mod health;

pub use health::readiness_check;
