//! # Authentication Middleware
//!
//! This module contains the authentication middleware that validates JWT
//! access tokens and provides the caller's user id to protected routes.
//! Token issuance is handled by an external collaborator; this side only
//! checks the tokens it is presented.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, instrument, trace, warn};

use crate::models::AppState;
use crate::services::jwt::Claims;

/// Authentication middleware for protecting routes
///
/// This middleware validates JWT access tokens from the Authorization header
/// and extracts the numeric user id for use by downstream handlers.
///
/// # Authentication Flow
///
/// 1. Extracts `Authorization` header with `Bearer <token>` format
/// 2. Validates the JWT token signature and expiration
/// 3. Parses the numeric user ID from the token claims
/// 4. Adds [`AuthUser`] to request extensions for handler access
///
/// # Returns
///
/// - **Success**: Continues to next handler with user context
/// - **Failure**: Returns `401 Unauthorized` for invalid/missing tokens
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    trace!("Processing authentication middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing Authorization header");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        warn!("Invalid Authorization header format");
        return Err(StatusCode::UNAUTHORIZED);
    };
    trace!("Extracted bearer token from Authorization header");

    match state.jwt_service.validate_access_token(token) {
        Ok(claims) => {
            let user_id = claims.sub.parse::<i64>().map_err(|e| {
                error!(error = %e, "Failed to parse user ID from token claims");
                StatusCode::UNAUTHORIZED
            })?;

            debug!(user_id, "Authentication successful");
            req.extensions_mut().insert(AuthUser { user_id, claims });

            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(error = %e, "Token validation failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Authenticated user information available to handlers
///
/// This struct is inserted into request extensions by the authentication
/// middleware and can be extracted by route handlers that need the caller's
/// identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Unique identifier for the authenticated user
    pub user_id: i64,
    /// JWT claims containing additional token metadata
    pub claims: Claims,
}
