//! # Appointment Types
//!
//! Persisted appointment records and the enriched summary returned by the
//! listing endpoint.
//!
//! An appointment has exactly two lifecycle states: scheduled
//! (`canceled_at = None`) and canceled (`canceled_at` set once, terminal).
//! A scheduled appointment whose date has passed simply stays scheduled;
//! there is no separate "completed" state.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::ProviderProfile;

/// A persisted appointment record.
///
/// `date` keeps the precision the caller supplied when booking; only the
/// availability comparison works on the hour-truncated value.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub requester_id: i64,
    pub provider_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Set exactly once by cancellation; `None` means the appointment is active.
    #[serde(with = "time::serde::rfc3339::option")]
    pub canceled_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Appointment {
    /// Returns true while the appointment has not been canceled.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.canceled_at.is_none()
    }
}

/// One entry of the appointment listing, enriched with the provider's
/// public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub provider: ProviderProfile,
}
