//! # Notification Types
//!
//! User-directed text notifications written by the booking engine. The sink
//! is append-only: this core creates notifications but never updates or
//! deletes them.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stored notification addressed to a single user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
