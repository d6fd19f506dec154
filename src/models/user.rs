//! # User Directory Types
//!
//! Account records and the public profile slice exposed to other users.
//! Whether an account offers bookable services is fixed at creation via
//! `is_provider`; this core never mutates it.

use serde::{Deserialize, Serialize};

/// A user account as stored in the directory.
///
/// `password_hash` is carried for completeness of the record but is never
/// read by the booking core; credential handling lives in an external
/// collaborator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    /// True for accounts that offer bookable services.
    pub is_provider: bool,
    /// Reference to the user's avatar image, if one was uploaded.
    pub avatar_url: Option<String>,
}

/// Public profile slice used to enrich appointment listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
}
