//! Configuration management for the Classbook server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A value that is set but does not parse is logged and replaced by the
//! default.

use classbook_runtime::DEFAULT_BROADCAST_CAPACITY;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Booking rules and store tuning
    pub booking: BookingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (`CLASSBOOK_HOST`)
    pub host: String,
    /// Port to bind to (`CLASSBOOK_PORT`)
    pub port: u16,
}

/// Booking configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// Largest accepted `toDate - fromDate`, in days (`CLASSBOOK_MAX_SCHEDULE_DAYS`).
    /// Unset means any span is accepted.
    pub max_schedule_days: Option<u32>,
    /// Outcome broadcast channel capacity (`CLASSBOOK_BROADCAST_CAPACITY`)
    pub broadcast_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            booking: BookingConfig {
                max_schedule_days: None,
                broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            },
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                host: lookup("CLASSBOOK_HOST")
                    .filter(|host| !host.trim().is_empty())
                    .unwrap_or(defaults.server.host),
                port: parse_or("CLASSBOOK_PORT", &lookup, defaults.server.port),
            },
            booking: BookingConfig {
                max_schedule_days: parse_opt("CLASSBOOK_MAX_SCHEDULE_DAYS", &lookup),
                broadcast_capacity: parse_or(
                    "CLASSBOOK_BROADCAST_CAPACITY",
                    &lookup,
                    defaults.booking.broadcast_capacity,
                ),
            },
        }
    }

    /// `host:port` to bind the listener to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Ignoring unparseable setting");
            default
        }),
    }
}

fn parse_opt<T: FromStr>(key: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
    }
    parsed
}
