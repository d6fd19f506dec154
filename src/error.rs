//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! It centralizes error logging and HTTP response generation, eliminating
//! repetitive error handling patterns throughout the codebase.
//!
//! Business-rule rejections map to `400 Bad Request`, authorization-style
//! rejections keep the `401 Unauthorized` mapping of the original service,
//! and storage faults surface as `500` with details kept out of the body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::repo::RepoError;

/// Central application error type that encompasses all possible error
/// conditions.
///
/// The booking-rule variants each correspond to one rejection of the
/// validation sequences in [`crate::services::booking::BookingService`].
/// _Db errors are logged automatically, while other errors should be logged
/// at the point of creation if needed._
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error("target user is not a provider")]
    NotAProvider,

    #[error("scheduled date is in the past")]
    PastDate,

    #[error("slot already taken")]
    SlotUnavailable,

    #[error("requester and provider are the same user")]
    SelfBooking,

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("appointment already canceled")]
    AlreadyCanceled,

    #[error("cancellation window closed")]
    TooLateToCancel,

    #[error("internal server error")]
    Internal,
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            // A lost slot race surfaces exactly like the advisory check.
            RepoError::DuplicateSlot => AppError::SlotUnavailable,
            RepoError::Db(e) => AppError::Db(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Db(e) = &self {
            // Log detailed database errors for internal tracking
            error!(?e, "Database error occurred");
        }

        let (status, error) = match self {
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotAProvider => (
                StatusCode::UNAUTHORIZED,
                "You can only book appointments with providers",
            ),
            AppError::PastDate => (
                StatusCode::BAD_REQUEST,
                "You can only schedule a future date",
            ),
            AppError::SlotUnavailable => {
                (StatusCode::BAD_REQUEST, "Appointment date is not available")
            }
            AppError::SelfBooking => (
                StatusCode::BAD_REQUEST,
                "You cannot book an appointment with yourself",
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Forbidden(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AlreadyCanceled => {
                (StatusCode::BAD_REQUEST, "Appointment is already canceled")
            }
            AppError::TooLateToCancel => (
                StatusCode::UNAUTHORIZED,
                "You can only cancel appointments 2 hours in advance",
            ),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorBody { error });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
