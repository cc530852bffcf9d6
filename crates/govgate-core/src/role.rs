//! Dashboard roles and their API path segments

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four account kinds the backend serves.
///
/// Every authenticated resource lives under `/api/{role}/...`, and each role
/// sees a different slice of the same collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Grantee,
    Admin,
    Manager,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Citizen, Role::Grantee, Role::Admin, Role::Manager];

    /// Path segment under `/api/`.
    pub fn segment(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Grantee => "grantee",
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }

    /// Login endpoint path, relative to the API base URL.
    pub fn login_path(&self) -> String {
        match self {
            Role::Citizen => "/api/auth/login/".to_string(),
            other => format!("/api/{}/login/", other.segment()),
        }
    }

    /// PascalCase field names for the role-specific credential pair sent
    /// alongside `Email`/`password` at login. Citizens have none.
    pub fn credential_fields(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Role::Citizen => None,
            Role::Grantee => Some(("GranteeUserName", "GranteePassword")),
            Role::Admin => Some(("AdministratorUserName", "AdministratorPassword")),
            Role::Manager => Some(("ManagerUserName", "ManagerPassword")),
        }
    }

    /// Collection holding the caller's own operator record, used for the
    /// profile view. Citizens use the dedicated `profile` endpoint instead.
    pub fn self_collection(&self) -> &'static str {
        match self {
            Role::Citizen => "profile",
            Role::Grantee => "grantee",
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }

    /// Human title for headers.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Citizen => "Citizen",
            Role::Grantee => "Grantee",
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Ok(Role::Citizen),
            "grantee" => Ok(Role::Grantee),
            "admin" | "administrator" => Ok(Role::Admin),
            "manager" | "sitemanager" => Ok(Role::Manager),
            _ => Err(CoreError::UnknownVariant {
                kind: "role",
                value: s.to_string(),
                expected: "citizen, grantee, admin, manager",
            }),
        }
    }
}

/// Default role username: the local part of the e-mail address.
pub fn default_role_username(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
