//! HTTP client wrapper for the backend API

use crate::api::RetryPolicy;
use crate::config::{Config, ConfigPaths};
use crate::credentials::{get_credential_store, CredentialStore};
use crate::error::{CliError, CliResult};
use crate::logging::Redactor;
use crate::models::{Credentials, RefreshResponse, Session};
use govgate_core::Role;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// API client for authenticated calls under one role's URL tree
pub struct ApiClient {
    client: Client,
    config: Config,
    role: Role,
    store: Box<dyn CredentialStore>,
    redactor: Redactor,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Client for the stored session. `role_override` wins over the
    /// session's role; without either the citizen tree is used.
    pub fn from_defaults(role_override: Option<Role>) -> CliResult<Self> {
        let paths = ConfigPaths::new()?;
        let config = Config::load(&paths)?;
        let role = match role_override {
            Some(role) => role,
            None => Session::load(&paths)?
                .map(|session| session.role)
                .unwrap_or(Role::Citizen),
        };
        Self::new(config, &paths, role)
    }

    pub fn new(config: Config, paths: &ConfigPaths, role: Role) -> CliResult<Self> {
        let store = get_credential_store(paths);
        Self::with_store(config, role, store)
    }

    /// Client over an explicit credential store.
    pub fn with_store(
        config: Config,
        role: Role,
        store: Box<dyn CredentialStore>,
    ) -> CliResult<Self> {
        let client = build_http_client(&config)?;
        let retry = RetryPolicy::from(&config.retry);
        Ok(Self {
            client,
            config,
            role,
            store,
            redactor: Redactor::new(),
            retry,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// `{api_url}/api/{role}/{path}/`
    pub fn url(&self, path: &str) -> String {
        self.config.role_url(self.role, path)
    }

    /// Stored credentials, refreshed first when they expire within the
    /// refresh window.
    pub async fn valid_credentials(&self) -> CliResult<Credentials> {
        let credentials = self.store.load()?.ok_or(CliError::NotAuthenticated)?;
        if credentials.needs_refresh() {
            debug!(expires_at = %credentials.expires_at, "Access token near expiry, refreshing");
            self.refresh(&credentials).await
        } else {
            Ok(credentials)
        }
    }

    /// Exchange the refresh token. A rejected refresh clears the store.
    async fn refresh(&self, credentials: &Credentials) -> CliResult<Credentials> {
        let url = self.config.refresh_url();
        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refresh": credentials.refresh_token }))
            .send()
            .await?;
        debug!(
            method = "POST",
            url = %url,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Token refresh"
        );

        if !response.status().is_success() {
            warn!(
                status = response.status().as_u16(),
                "Token refresh rejected, clearing stored credentials"
            );
            self.store.delete()?;
            return Err(CliError::SessionExpired);
        }

        let body: RefreshResponse = response.json().await.map_err(|e| {
            CliError::AuthenticationFailed(format!("Invalid refresh response: {e}"))
        })?;
        let refresh_token = body
            .refresh
            .unwrap_or_else(|| credentials.refresh_token.clone());
        let refreshed = Credentials::from_tokens(body.access, refresh_token);
        self.store.store(&refreshed)?;
        Ok(refreshed)
    }

    /// Authenticated GET returning JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> CliResult<T> {
        let response = self.send(Method::GET, url, None).await?;
        self.decode(response, what).await
    }

    /// Authenticated POST with JSON body
    pub async fn post_json<B, T>(&self, url: &str, body: &B, what: &str) -> CliResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, url, Some(&body)).await?;
        self.decode(response, what).await
    }

    /// Authenticated PATCH with JSON body
    pub async fn patch_json<B, T>(&self, url: &str, body: &B, what: &str) -> CliResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PATCH, url, Some(&body)).await?;
        self.decode(response, what).await
    }

    /// Authenticated DELETE. An empty 204 body is success.
    pub async fn delete(&self, url: &str, what: &str) -> CliResult<()> {
        let response = self.send(Method::DELETE, url, None).await?;
        let _: Value = self.decode(response, what).await?;
        Ok(())
    }

    /// POST without a bearer token, for login and registration.
    pub async fn post_public<B, T>(&self, url: &str, body: &B, what: &str) -> CliResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self
            .retry
            .execute(what, CliError::is_transient, || {
                self.dispatch(Method::POST, url, Some(&body), None)
            })
            .await?;
        self.decode(response, what).await
    }

    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> CliResult<Response> {
        self.retry
            .execute(url, CliError::is_transient, || {
                self.send_once(method.clone(), url, body)
            })
            .await
    }

    /// One authenticated exchange. A 401 triggers one refresh and one replay.
    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> CliResult<Response> {
        let credentials = self.valid_credentials().await?;
        let response = self
            .dispatch(method.clone(), url, body, Some(&credentials.access_token))
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(url = %url, "Access token rejected, refreshing and replaying once");
        let refreshed = self.refresh(&credentials).await?;
        self.dispatch(method, url, body, Some(&refreshed.access_token))
            .await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> CliResult<Response> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            trace!(body = %self.redactor.redact(&body.to_string()), "Request body");
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await?;
        debug!(
            method = %method,
            url = %url,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "HTTP request"
        );
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response, what: &str) -> CliResult<T> {
        let status = response.status();
        let html_header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("text/html"));
        let text = response.text().await?;
        trace!(status = status.as_u16(), body = %self.redactor.redact(&text), "Response body");

        let is_html = html_header || looks_like_html(&text);
        if !status.is_success() {
            return Err(classify_error(status, &text, is_html, what));
        }
        if is_html {
            return Err(CliError::UnexpectedHtml {
                status: status.as_u16(),
            });
        }

        let payload = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str(payload).map_err(|e| CliError::Api {
            status: status.as_u16(),
            message: format!("Unexpected {what} response format: {e}"),
        })
    }
}

fn build_http_client(config: &Config) -> CliResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("govgate/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CliError::Network(format!("Failed to create HTTP client: {e}")))
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    let prefix = head.get(..15).unwrap_or(head);
    prefix.eq_ignore_ascii_case("<!doctype html>")
        || prefix.to_ascii_lowercase().starts_with("<html")
}

/// Map a non-2xx response onto a [`CliError`].
pub(crate) fn classify_error(status: StatusCode, body: &str, is_html: bool, what: &str) -> CliError {
    let message = || error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => CliError::AuthenticationFailed(message()),
        StatusCode::FORBIDDEN => CliError::Forbidden(message()),
        StatusCode::NOT_FOUND => CliError::NotFound(what.to_string()),
        StatusCode::CONFLICT => CliError::Conflict(message()),
        _ if is_html => CliError::UnexpectedHtml {
            status: status.as_u16(),
        },
        _ => CliError::Api {
            status: status.as_u16(),
            message: message(),
        },
    }
}

/// Human-readable message from an error body. Prefers `detail`, then
/// `message`/`error`, then the first field error of a validation payload.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() || looks_like_html(trimmed) {
            fallback()
        } else {
            crate::output::truncate(trimmed, 200)
        };
    };

    for key in ["detail", "message", "error"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return text.to_string();
        }
    }

    if let Some(map) = value.as_object() {
        for (field, errors) in map {
            let first = match errors {
                Value::Array(items) => items.first().and_then(Value::as_str),
                Value::String(text) => Some(text.as_str()),
                _ => None,
            };
            if let Some(first) = first {
                return format!("{field}: {first}");
            }
        }
    }

    fallback()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"detail": "Authentication credentials were not provided.", "message": "x"}"#;
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, body),
            "Authentication credentials were not provided."
        );
    }

    #[test]
    fn test_error_message_field_errors() {
        let body = r#"{"Subject": ["This field is required."]}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Subject: This field is required."
        );
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html><body>bad</body></html>"),
            "Bad Gateway"
        );
        assert_eq!(error_message(StatusCode::BAD_REQUEST, "plain text"), "plain text");
    }

    #[test]
    fn test_classify_by_status() {
        assert!(matches!(
            classify_error(StatusCode::FORBIDDEN, "{}", false, "grant"),
            CliError::Forbidden(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::NOT_FOUND, "<html></html>", true, "grant abc"),
            CliError::NotFound(ref what) if what == "grant abc"
        ));
        assert!(matches!(
            classify_error(StatusCode::CONFLICT, r#"{"detail": "exists"}"#, false, "x"),
            CliError::Conflict(ref m) if m == "exists"
        ));
        assert!(matches!(
            classify_error(StatusCode::BAD_GATEWAY, "<html></html>", true, "x"),
            CliError::UnexpectedHtml { status: 502 }
        ));
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, "{}", false, "x"),
            CliError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("  <!DOCTYPE html><html>"));
        assert!(looks_like_html("<HTML>"));
        assert!(!looks_like_html(r#"{"a": 1}"#));
        assert!(!looks_like_html(""));
    }
}
