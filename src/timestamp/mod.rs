//! Timestamps at storage precision.
//!
//! `PostgreSQL` `timestamptz` keeps microseconds. Every instant the domain
//! records is truncated to that precision first, so a value returned from a
//! write compares equal to the same value read back later, whichever store
//! holds it.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Fractional-second digits kept by the stores.
pub const STORAGE_SUBSEC_DIGITS: u16 = 6;

/// Returns the current instant from `clock`, truncated to microseconds.
#[must_use]
pub fn now(clock: &impl Clock) -> DateTime<Utc> {
    truncate(clock.utc())
}

/// Truncates `instant` to microseconds.
#[must_use]
pub fn truncate(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORAGE_SUBSEC_DIGITS)
}
