//! Token endpoint payloads and JWT claim decoding

use crate::error::{CliError, CliResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Response from the login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    /// Account record as the backend serializes it; shape varies by role.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// Response from `POST /api/auth/refresh/`. Rotation is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Claims read from an access token. Nothing here is trusted for
/// authorization; the server validates every request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JwtClaims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl JwtClaims {
    /// Decode the payload segment of a JWT without verifying it.
    pub fn decode(token: &str) -> CliResult<Self> {
        let mut parts = token.split('.');
        let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                return Err(CliError::AuthenticationFailed(
                    "Invalid token format".to_string(),
                ))
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| CliError::AuthenticationFailed(format!("Invalid token encoding: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| CliError::AuthenticationFailed(format!("Invalid token claims: {e}")))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// `user_id` as text, whether the backend put a number or a string in it.
    pub fn user_id(&self) -> Option<String> {
        match self.user_id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn display_name(&self) -> Option<String> {
        self.name.clone().or_else(|| self.user_name.clone())
    }
}

#[cfg(test)]
pub(crate) fn encode_test_jwt(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = encode_test_jwt(&json!({
            "exp": 1_900_000_000,
            "user_id": 42,
            "user_name": "jdoe",
            "email": "jane@gov.example"
        }));
        let claims = JwtClaims::decode(&token).unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("42"));
        assert_eq!(claims.display_name().as_deref(), Some("jdoe"));
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_900_000_000);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(JwtClaims::decode("not-a-jwt").is_err());
        assert!(JwtClaims::decode("a.b.c.d").is_err());
        assert!(JwtClaims::decode("a.!!!.c").is_err());
    }

    #[test]
    fn test_login_response_without_user() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"access": "a", "refresh": "r"}"#).unwrap();
        assert!(response.user.is_none());
    }

    #[test]
    fn test_refresh_response_without_rotation() {
        let response: RefreshResponse = serde_json::from_str(r#"{"access": "a"}"#).unwrap();
        assert!(response.refresh.is_none());
    }
}
