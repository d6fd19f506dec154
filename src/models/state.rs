use tracing::info;

use crate::services::booking::BookingService;
use crate::services::jwt::JwtService;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The booking rule engine with its injected repositories.
    pub booking: BookingService,
    /// JWT service for access token validation.
    pub jwt_service: JwtService,
}

impl AppState {
    /// Creates a new application state with the provided services.
    pub fn new(booking: BookingService, jwt_service: JwtService) -> Self {
        info!("Initializing application state");
        Self {
            booking,
            jwt_service,
        }
    }
}
