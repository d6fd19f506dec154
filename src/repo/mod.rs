//! # Repositories
//!
//! Storage access for the booking core, one repository per owned collection.
//! The traits are the seams the rule engine is built against; the Postgres
//! implementations in the sibling modules are what the binary wires in, and
//! tests substitute trait-implementing fakes.
//!
//! ## Available Repositories
//!
//! - **Users** (`users`) - Account lookup for the user directory
//! - **Appointments** (`appointments`) - Appointment records and slot lookups
//! - **Notifications** (`notifications`) - Append-only notification sink

mod appointments;
mod notifications;
mod users;

use thiserror::Error;

pub use appointments::{AppointmentRepository, PgAppointmentRepository};
pub use notifications::{NotificationRepository, PgNotificationRepository};
pub use users::{PgUserRepository, UserRepository};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// An insert collided with an active appointment holding the same
    /// (provider, hour) slot. Raised by the storage-level uniqueness
    /// constraint, which closes the window the advisory availability check
    /// leaves open under concurrent writers.
    #[error("slot already held by an active appointment")]
    DuplicateSlot,

    #[error("database error")]
    Db(#[from] sqlx::Error),
}
