use super::{default_true, Association, Grantee, Labelled, Ref};
use crate::error::Result;
use crate::ids::ServiceId;
use crate::validate::{self, MACHINE_NAME_MAX_LEN, TITLE_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A gated government service offered by one association.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicService {
    #[serde(rename = "id")]
    pub id: ServiceId,
    #[serde(default)]
    pub title: String,
    /// Routing key of the gated resource behind the gateway.
    #[serde(default)]
    pub machine_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub grantee: Vec<Ref<Grantee>>,
    #[serde(default)]
    pub association: Option<Ref<Association>>,
    #[serde(default)]
    pub restricted: bool,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default = "default_true")]
    pub visibility: bool,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Labelled for PublicService {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewPublicService {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter a service title"),
        length(max = TITLE_MAX_LEN, message = "Title must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter a machine name for the service"
        ),
        length(
            max = MACHINE_NAME_MAX_LEN,
            message = "MachineName must be at most 150 characters"
        )
    )]
    pub machine_name: String,
    pub description: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub association: Uuid,
    pub grantee: Vec<Uuid>,
    pub restricted: bool,
    #[serde(rename = "URL")]
    #[validate(url(message = "Please enter a valid service URL"))]
    pub url: String,
    pub visibility: bool,
}

impl NewPublicService {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct PublicServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate::not_blank", message = "Service title cannot be empty"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantee: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricted: Option<bool>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please enter a valid service URL"))]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<bool>,
}

impl PublicServiceUpdate {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
