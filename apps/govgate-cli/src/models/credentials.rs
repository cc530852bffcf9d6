//! Stored credentials model

use crate::models::JwtClaims;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifetime assumed when the access token carries no readable `exp`.
pub const FALLBACK_LIFETIME_MINUTES: i64 = 5;

/// Refresh when the access token expires within this window.
pub const REFRESH_WINDOW_MINUTES: i64 = 5;

/// Bearer tokens for API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiration time
    pub expires_at: DateTime<Utc>,

    /// Token type (always "Bearer")
    pub token_type: String,
}

impl Credentials {
    /// Build credentials from a token pair, reading the expiry from the
    /// access token's `exp` claim.
    pub fn from_tokens(access_token: String, refresh_token: String) -> Self {
        let expires_at = JwtClaims::decode(&access_token)
            .ok()
            .and_then(|claims| claims.expires_at())
            .unwrap_or_else(|| Utc::now() + Duration::minutes(FALLBACK_LIFETIME_MINUTES));

        Self {
            access_token,
            refresh_token,
            expires_at,
            token_type: "Bearer".to_string(),
        }
    }

    /// Check if the access token is expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Expired or about to expire.
    pub fn needs_refresh(&self) -> bool {
        self.expires_at <= Utc::now() + Duration::minutes(REFRESH_WINDOW_MINUTES)
    }
}
