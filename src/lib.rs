//! # Agenda - Appointment Scheduling Backend
//!
//! Scheduling backend for a service-marketplace app: users book hour-slot
//! appointments with providers, providers get notified, and bookings can be
//! canceled with enough notice.
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for the appointment endpoints
//! - [`middleware`] - Custom middleware for authentication
//! - [`models`] - Shared data types and application state
//! - [`repo`] - Repository traits and their Postgres implementations
//! - [`services`] - Business logic services (booking rules, JWT, notices)
//! - [`utils`] - Utility functions and constants

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;

use std::env;
use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::{ExposeSecret, SecretSlice};
use sqlx::PgPool;

use crate::handlers::{cancel_appointment, create_appointment, health_check, list_appointments};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::repo::{
    AppointmentRepository, NotificationRepository, PgAppointmentRepository,
    PgNotificationRepository, PgUserRepository, UserRepository,
};
use crate::services::booking::BookingService;
use crate::services::jwt::JwtService;
use crate::services::notice::Locale;

/// Creates an Axum router backed by Postgres repositories.
///
/// This is a convenience function that calls [`app_with_repositories`] with
/// the Postgres implementations over the given pool. Tests substitute
/// in-memory repositories instead.
#[inline]
pub fn app(db_pool: PgPool) -> Router {
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(db_pool.clone()));
    let appointments: Arc<dyn AppointmentRepository> =
        Arc::new(PgAppointmentRepository::new(db_pool.clone()));
    let notifications: Arc<dyn NotificationRepository> =
        Arc::new(PgNotificationRepository::new(db_pool));

    app_with_repositories(users, appointments, notifications)
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `users` - User directory lookups
/// * `appointments` - Appointment store
/// * `notifications` - Append-only notification sink
///
/// # Environment Variables
///
/// - `JWT_SECRET` - Required for access token validation
/// - `APP_LOCALE` - Optional notification locale (`en-US` default, `pt-BR`)
///
/// # Returns
///
/// A configured Axum router with all application routes and middleware
pub fn app_with_repositories(
    users: Arc<dyn UserRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    notifications: Arc<dyn NotificationRepository>,
) -> Router {
    let jwt_keys = SecretSlice::from(
        env::var("JWT_SECRET")
            .expect("Env variable `JWT_SECRET` should be set")
            .into_bytes(),
    );

    let jwt_service = JwtService::new(
        EncodingKey::from_secret(jwt_keys.expose_secret()),
        DecodingKey::from_secret(jwt_keys.expose_secret()),
    );

    let booking = BookingService::new(users, appointments, notifications, Locale::from_env());

    let state = Arc::new(AppState::new(booking, jwt_service));

    let protected_routes = Router::new()
        .route("/appointments", get(list_appointments))
        .route("/appointments", post(create_appointment))
        .route("/appointments/{id}", delete(cancel_appointment))
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new().route("/health-check", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
