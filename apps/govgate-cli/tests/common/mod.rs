//! Shared fixtures for integration tests
//!
//! Every test gets its own mock backend and its own temporary config
//! directory, so credentials never touch the real keyring.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use govgate_cli::api::ApiClient;
use govgate_cli::config::{Config, ConfigPaths};
use govgate_cli::credentials::{CredentialStore, FileCredentialStore};
use govgate_cli::models::Credentials;
use govgate_core::Role;
use serde_json::{json, Value};
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const REFRESH_TOKEN: &str = "test-refresh-token";

pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
    pub paths: ConfigPaths,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("Failed to create temp dir");
        let paths = ConfigPaths::in_dir(dir.path());
        Self { server, dir, paths }
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.server.uri(),
            timeout_secs: 5,
            ..Config::default()
        }
    }

    fn store(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.paths.credentials_file.clone())
    }

    /// Store a token pair that stays valid for the whole test.
    pub fn store_credentials(&self, access: &str) {
        self.store_credentials_expiring(access, Utc::now() + Duration::hours(1));
    }

    pub fn store_credentials_expiring(&self, access: &str, expires_at: chrono::DateTime<Utc>) {
        let credentials = Credentials {
            access_token: access.to_string(),
            refresh_token: REFRESH_TOKEN.to_string(),
            expires_at,
            token_type: "Bearer".to_string(),
        };
        self.store()
            .store(&credentials)
            .expect("Failed to store credentials");
    }

    pub fn stored_credentials(&self) -> Option<Credentials> {
        self.store().load().expect("Failed to load credentials")
    }

    /// Client with no stored tokens.
    pub fn anonymous_client(&self, role: Role) -> ApiClient {
        ApiClient::with_store(self.config(), role, Box::new(self.store()))
            .expect("Failed to build client")
    }

    /// Client logged in as `role` with valid tokens.
    pub fn client(&self, role: Role) -> ApiClient {
        self.store_credentials(ACCESS_TOKEN);
        self.anonymous_client(role)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn request_fixture(id: Uuid, subject: &str, extra: Value) -> Value {
    let mut record = json!({
        "id": id.to_string(),
        "Subject": subject,
        "Message": "Please grant access",
        "PublicService": {
            "id": Uuid::new_v4().to_string(),
            "Title": "Parking permits",
            "MachineName": "parking-permits",
            "Description": "Residential parking",
        },
        "Created": "2026-10-01T09:00:00Z",
    });
    merge(&mut record, extra);
    record
}

pub fn grant_fixture(id: Uuid, extra: Value) -> Value {
    let mut record = json!({
        "id": id.to_string(),
        "Message": "",
        "Request": Uuid::new_v4().to_string(),
        "Decline": false,
    });
    merge(&mut record, extra);
    record
}

pub fn citizen_fixture(user_name: &str, is_active: bool) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "UserName": user_name,
        "FirstName": "Jane",
        "Surname": "Doe",
        "NationalId": "19800101-1234",
        "Email": format!("{user_name}@gov.example"),
        "is_active": is_active,
    })
}

pub fn log_fixture(created: &str) -> Value {
    json!({
        "id": Uuid::new_v4().to_string(),
        "Method": "PATCH",
        "Object": "Request",
        "StatusCode": 200,
        "Created": created,
    })
}

fn merge(target: &mut Value, extra: Value) {
    if let (Some(target), Value::Object(extra)) = (target.as_object_mut(), extra) {
        target.extend(extra);
    }
}
