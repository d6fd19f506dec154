//! # Appointment Handlers
//!
//! This module implements the appointment endpoints: listing the caller's
//! active bookings, booking a slot with a provider, and canceling a booking.
//! All rule evaluation lives in [`BookingService`]; the handlers only
//! marshal requests and rely on [`AppError`] for response mapping.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{AppState, Appointment, AppointmentSummary};

/// Request payload for booking an appointment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    #[validate(range(min = 1))]
    pub provider_id: i64,
    /// ISO-8601 timestamp of the requested slot
    pub date: String,
}

/// Query parameters for the appointment listing
#[derive(Debug, Deserialize)]
pub struct ListAppointmentsQuery {
    pub page: Option<i64>,
}

/// Lists the authenticated user's active appointments.
///
/// GET /appointments?page=1
///
/// Returns the caller's non-canceled appointments ordered by date ascending,
/// 20 per page, each enriched with the provider's public profile. The page
/// defaults to 1.
///
/// # Returns
///
/// - `200 OK` with the page of appointment summaries
/// - `401 Unauthorized` - Missing or invalid authentication token
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListAppointmentsQuery>,
) -> AppResult<Json<Vec<AppointmentSummary>>> {
    debug!(page = ?query.page, "Processing appointment listing request");

    let appointments = state
        .booking
        .list_appointments(user.user_id, query.page.unwrap_or(1))
        .await?;

    Ok(Json(appointments))
}

/// Books an appointment with a provider.
///
/// POST /appointments {provider_id, date}
///
/// Validates the booking against the scheduling rules and, on success,
/// persists the appointment and notifies the provider.
///
/// # Returns
///
/// - `200 OK` with the created appointment
/// - `400 Bad Request` - Malformed body, past date, taken slot, or self-booking
/// - `401 Unauthorized` - Missing/invalid token or target is not a provider
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> AppResult<Json<Appointment>> {
    // Map body rejections ourselves so schema failures report 400 like every
    // other validation error instead of axum's default 422.
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "Rejected malformed booking payload");
        AppError::Validation("provider_id and date are required")
    })?;

    if let Err(e) = payload.validate() {
        warn!(error = %e, "Rejected invalid booking payload");
        return Err(AppError::Validation("provider_id must be a positive id"));
    }

    debug!(provider_id = payload.provider_id, "Processing booking request");

    let appointment = state
        .booking
        .create_appointment(user.user_id, payload.provider_id, &payload.date)
        .await?;

    Ok(Json(appointment))
}

/// Cancels one of the authenticated user's appointments.
///
/// DELETE /appointments/{id}
///
/// The appointment must belong to the caller, still be active, and start
/// more than 2 hours from now.
///
/// # Returns
///
/// - `200 OK` with the updated appointment (`canceled_at` set)
/// - `400 Bad Request` - Appointment already canceled
/// - `401 Unauthorized` - Missing/invalid token, foreign appointment, or
///   cancellation window closed
/// - `404 Not Found` - No appointment with that id
/// - `500 Internal Server Error` - Database error
#[instrument(
    skip_all,
    fields(
        user_id = %user.user_id,
        appointment_id = %appointment_id,
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn cancel_appointment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(appointment_id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    debug!("Processing cancellation request");

    let appointment = state
        .booking
        .cancel_appointment(user.user_id, appointment_id)
        .await?;

    Ok(Json(appointment))
}
