//! # JWT Service
//!
//! This module provides JSON Web Token (JWT) functionality for request
//! authentication. Token issuance (login, refresh) belongs to an external
//! collaborator; this service covers minting access tokens and validating
//! the ones presented on incoming requests.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, trace, warn};

use crate::utils::constant::ACCESS_TOKEN_EXPIRY;

/// Errors that can occur during JWT operations
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (numeric user ID as string)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Service for minting and validating access tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a new JWT service with the provided keys.
    ///
    /// # Arguments
    ///
    /// * `encoding_key` - Key used for signing JWT tokens
    /// * `decoding_key` - Key used for verifying JWT tokens
    pub fn new(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Creates a new access token for the user.
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::EncodingError`] if token signing fails.
    #[instrument(skip(self))]
    pub fn create_access_token(&self, user_id: i64) -> Result<String, JwtError> {
        trace!("Creating new access token");

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time should not be before UNIX EPOCH")
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + ACCESS_TOKEN_EXPIRY.as_secs(),
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validates an access token and returns its claims.
    ///
    /// This method verifies the token signature and checks expiration.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenExpired`] - Token has expired
    /// - [`JwtError::InvalidToken`] - Signature or structure is invalid
    #[instrument(skip_all)]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    warn!("Access token expired");
                    JwtError::TokenExpired
                }
                _ => {
                    warn!(error = %e, "Access token validation failed");
                    JwtError::InvalidToken
                }
            })?;

        trace!("Access token validated");
        Ok(token_data.claims)
    }
}
