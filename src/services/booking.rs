//! # Booking Rule Engine
//!
//! Validation and lifecycle rules for appointments. Every storage access
//! goes through the injected repository traits, so the engine itself stays
//! independent of Postgres and can be exercised against in-memory fakes.
//!
//! ## Rules
//!
//! - Appointments can only target users flagged as providers.
//! - Slots are hour-granular and exclusive per provider while active.
//! - Bookings must start no earlier than the current clock hour.
//! - Users cannot book themselves.
//! - Cancellation requires more than 2 hours of notice and is terminal.

use std::sync::Arc;

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Appointment, AppointmentSummary};
use crate::repo::{AppointmentRepository, NotificationRepository, UserRepository};
use crate::services::notice::Locale;
use crate::utils::constant::{APPOINTMENTS_PAGE_SIZE, CANCEL_MIN_NOTICE};
use crate::utils::time::start_of_hour;

/// The booking rule engine.
///
/// Holds the three repositories it reads and writes plus the locale used to
/// word booking notices. Cheap to share behind the application state.
pub struct BookingService {
    users: Arc<dyn UserRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    notifications: Arc<dyn NotificationRepository>,
    locale: Locale,
}

impl BookingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        notifications: Arc<dyn NotificationRepository>,
        locale: Locale,
    ) -> Self {
        Self {
            users,
            appointments,
            notifications,
            locale,
        }
    }

    /// Lists the requester's active appointments, date ascending, paginated
    /// at [`APPOINTMENTS_PAGE_SIZE`] entries per page.
    ///
    /// Page numbers start at 1; values below that are treated as 1. An empty
    /// page is a normal result, not an error.
    #[instrument(skip(self))]
    pub async fn list_appointments(
        &self,
        requester_id: i64,
        page: i64,
    ) -> AppResult<Vec<AppointmentSummary>> {
        let page = page.max(1);
        let offset = (page - 1) * APPOINTMENTS_PAGE_SIZE;

        let appointments = self
            .appointments
            .list_active_for_requester(requester_id, offset, APPOINTMENTS_PAGE_SIZE)
            .await?;

        debug!(count = appointments.len(), "Listed active appointments");
        Ok(appointments)
    }

    /// Books an appointment with a provider.
    ///
    /// Runs the validation sequence in order, short-circuiting on the first
    /// failure:
    ///
    /// 1. `raw_date` must parse as an RFC 3339 timestamp.
    /// 2. `provider_id` must belong to a user flagged as a provider.
    /// 3. The containing clock hour must not have started in the past.
    /// 4. No active appointment may hold the provider's hour slot.
    /// 5. The requester cannot book themselves.
    ///
    /// On success the appointment is stored with the caller's original
    /// timestamp (only the availability comparison is hour-normalized) and a
    /// localized notice naming the requester is appended for the provider.
    #[instrument(skip(self, raw_date))]
    pub async fn create_appointment(
        &self,
        requester_id: i64,
        provider_id: i64,
        raw_date: &str,
    ) -> AppResult<Appointment> {
        let date = OffsetDateTime::parse(raw_date, &Rfc3339).map_err(|e| {
            warn!(error = %e, "Rejected unparseable appointment date");
            AppError::Validation("date must be a valid ISO-8601 timestamp")
        })?;

        match self.users.find_by_id(provider_id).await? {
            Some(user) if user.is_provider => {}
            _ => {
                warn!("Booking target is not a provider");
                return Err(AppError::NotAProvider);
            }
        }

        // Slot buckets are UTC clock hours, matching the storage index.
        let hour_start = start_of_hour(date.to_offset(UtcOffset::UTC));
        if hour_start < OffsetDateTime::now_utc() {
            warn!("Rejected booking for a past hour");
            return Err(AppError::PastDate);
        }

        if self
            .appointments
            .find_active_in_slot(provider_id, hour_start)
            .await?
            .is_some()
        {
            warn!("Requested slot already holds an active appointment");
            return Err(AppError::SlotUnavailable);
        }

        if provider_id == requester_id {
            warn!("Rejected self-booking attempt");
            return Err(AppError::SelfBooking);
        }

        let requester = self.users.find_by_id(requester_id).await?.ok_or_else(|| {
            // The id came from a validated token, so a miss means the
            // directory and the auth collaborator disagree.
            error!("Authenticated requester missing from user directory");
            AppError::Internal
        })?;

        // The unique index is the authority on slot exclusivity; losing the
        // race between the check above and this insert surfaces as
        // SlotUnavailable via RepoError::DuplicateSlot.
        let appointment = self
            .appointments
            .insert(requester_id, provider_id, date)
            .await?;

        let notice = self.locale.booking_notice(&requester.name, hour_start);
        let notification = self.notifications.append(provider_id, &notice).await?;
        debug!(notification_id = notification.id, "Provider notified");

        info!(appointment_id = appointment.id, "Appointment booked");
        Ok(appointment)
    }

    /// Cancels one of the requester's appointments.
    ///
    /// The appointment must exist, belong to the requester, still be active,
    /// and start more than [`CANCEL_MIN_NOTICE`] from now. Cancellation is
    /// terminal; the freed slot immediately becomes bookable again.
    #[instrument(skip(self))]
    pub async fn cancel_appointment(
        &self,
        requester_id: i64,
        appointment_id: i64,
    ) -> AppResult<Appointment> {
        let appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppError::NotFound("Appointment not found"))?;

        if appointment.requester_id != requester_id {
            warn!(
                owner_id = appointment.requester_id,
                "Cancellation attempted by a different user"
            );
            return Err(AppError::Forbidden(
                "You do not have permission to cancel this appointment",
            ));
        }

        if !appointment.is_active() {
            return Err(AppError::AlreadyCanceled);
        }

        let now = OffsetDateTime::now_utc();
        if now >= appointment.date - CANCEL_MIN_NOTICE {
            warn!("Cancellation attempted inside the notice window");
            return Err(AppError::TooLateToCancel);
        }

        let canceled = self
            .appointments
            .mark_canceled(appointment_id, now)
            .await?
            // A concurrent cancellation won; the transition stays one-way.
            .ok_or(AppError::AlreadyCanceled)?;

        info!(appointment_id, "Appointment canceled");
        Ok(canceled)
    }
}
