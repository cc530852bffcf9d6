use super::{Citizen, Labelled, Ref};
use crate::error::Result;
use crate::ids::AdministratorId;
use crate::validate::{self, ADMIN_USERNAME_MAX_LEN, GRANTEE_LIMIT_MAX};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Department administrator account. Managed by the site manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Administrator {
    #[serde(rename = "id")]
    pub id: AdministratorId,
    #[serde(default)]
    pub administrator_user_name: String,
    #[serde(default)]
    pub citizen: Option<Ref<Citizen>>,
    #[serde(default)]
    pub first_email: String,
    #[serde(default)]
    pub second_email: Option<String>,
    #[serde(default)]
    pub grantee_limit: Option<u32>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Labelled for Administrator {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.administrator_user_name.clone()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewAdministrator {
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter an administrator username"
        ),
        length(
            max = ADMIN_USERNAME_MAX_LEN,
            message = "AdministratorUserName must be at most 50 characters"
        )
    )]
    pub administrator_user_name: String,
    pub citizen: Uuid,
    #[validate(email(message = "Please enter a valid email address"))]
    pub first_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub second_email: Option<String>,
    #[validate(range(max = GRANTEE_LIMIT_MAX, message = "GranteeLimit must be between 0 and 99"))]
    pub grantee_limit: u32,
}

impl NewAdministrator {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
