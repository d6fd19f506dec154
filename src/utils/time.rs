//! # Time Utilities
//!
//! Hour normalization for slot comparisons. Availability is hour-granular:
//! two booking requests inside the same clock hour compete for the same slot
//! even when their timestamps differ below the hour.

use time::OffsetDateTime;

/// Truncates a timestamp down to the start of its containing clock hour.
///
/// Used only for availability comparison and the past-date check; stored
/// appointment dates keep the caller's precision.
pub fn start_of_hour(dt: OffsetDateTime) -> OffsetDateTime {
    dt.replace_minute(0)
        .and_then(|dt| dt.replace_second(0))
        .and_then(|dt| dt.replace_nanosecond(0))
        .expect("zero is always a valid minute, second and nanosecond")
}
