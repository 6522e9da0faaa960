//! Source of the current time.
//!
//! Date bound checks are relative to "now".  The service reads it
//! through the [`Clock`] trait so that tests can pin it.

use chrono::{DateTime, Utc};

/// Supplies the current instant.
///
/// Clocks must be thread‑safe (`Send + Sync`) because a single
/// service instance is shared across request handlers.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
