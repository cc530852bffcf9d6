use super::{default_true, Labelled};
use crate::error::Result;
use crate::ids::CitizenId;
use crate::validate::{self, USERNAME_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered end-user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Citizen {
    #[serde(rename = "id")]
    pub id: CitizenId,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub national_id: String,
    #[serde(rename = "DOB", default, with = "crate::time::opt")]
    pub dob: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(rename = "is_active", default = "default_true")]
    pub is_active: bool,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Citizen {
    /// "First [Second] Surname", skipping blank parts.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            Some(self.surname.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl Labelled for Citizen {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        if self.user_name.is_empty() {
            self.email.clone()
        } else {
            self.user_name.clone()
        }
    }
}

/// Self-registration payload for `POST /api/auth/register/`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct Registration {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter a username"),
        length(
            max = USERNAME_MAX_LEN,
            message = "UserName must be at most 100 characters"
        )
    )]
    pub user_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate::not_blank", message = "Please enter your first name"))]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[validate(custom(function = "validate::not_blank", message = "Please enter your surname"))]
    pub surname: String,
    #[validate(custom(
        function = "validate::not_blank",
        message = "Please enter your national identification number"
    ))]
    pub national_id: String,
    #[serde(rename = "DOB", with = "crate::time::opt")]
    #[validate(required(message = "Please enter your date of birth"))]
    pub dob: Option<DateTime<Utc>>,
    #[serde(rename = "password")]
    #[validate(custom(function = "validate::not_blank", message = "Please enter a password"))]
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

/// Partial update of a citizen record (PATCH). Unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CitizenUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate::not_blank", message = "Username cannot be empty"))]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[serde(rename = "is_active", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CitizenUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.first_name.is_none()
            && self.second_name.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.is_active.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
