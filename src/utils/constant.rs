//! # Application Constants
//!
//! This module defines configuration constants used throughout the agenda
//! application. These constants control pagination, booking rules, and
//! security settings.

use std::time::Duration;

/// Number of entries per page of the appointment listing.
pub const APPOINTMENTS_PAGE_SIZE: i64 = 20;

/// Minimum notice required to cancel an appointment.
///
/// Cancellation is permitted only strictly before the appointment date minus
/// this duration.
pub const CANCEL_MIN_NOTICE: Duration = Duration::from_secs(2 * 60 * 60);

/// Expiration time for JWT access tokens.
pub const ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days
