//! Authentication APIs - role login and citizen registration

use crate::api::ApiClient;
use crate::error::CliResult;
use crate::models::LoginResponse;
use govgate_core::models::Registration;
use govgate_core::{default_role_username, Role};
use serde_json::{json, Value};

/// Login payload for `role`.
///
/// Citizens send `Email` and `password`. Staff roles add their role
/// credentials; the username defaults to the e-mail's local part and the
/// password to the account password.
pub fn login_body(
    role: Role,
    email: &str,
    password: &str,
    role_username: Option<&str>,
    role_password: Option<&str>,
) -> Value {
    let mut body = json!({
        "Email": email,
        "password": password,
    });

    if let Some((user_field, password_field)) = role.credential_fields() {
        body[user_field] = json!(role_username.unwrap_or_else(|| default_role_username(email)));
        body[password_field] = json!(role_password.unwrap_or(password));
    }

    body
}

/// Exchange credentials for a token pair at the client's role endpoint.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
    role_username: Option<&str>,
    role_password: Option<&str>,
) -> CliResult<LoginResponse> {
    let role = client.role();
    let url = client.config().login_url(role);
    let body = login_body(role, email, password, role_username, role_password);
    tracing::info!(role = %role, "Logging in");
    client.post_public(&url, &body, "login").await
}

/// Create a citizen account. The response shape is not relied upon.
pub async fn register(client: &ApiClient, registration: &Registration) -> CliResult<Value> {
    registration.validate()?;
    let url = client.config().register_url();
    client.post_public(&url, registration, "registration").await
}
