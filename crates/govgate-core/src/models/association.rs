use super::{Administrator, Department, Labelled, Ref};
use crate::error::Result;
use crate::ids::AssociationId;
use crate::validate::{self, TITLE_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sub-unit of a department that groups public services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Association {
    #[serde(rename = "id")]
    pub id: AssociationId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: Option<Ref<Department>>,
    #[serde(default)]
    pub administrator: Option<Ref<Administrator>>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Labelled for Association {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewAssociation {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter an association title"),
        length(max = TITLE_MAX_LEN, message = "Title must be at most 100 characters")
    )]
    pub title: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewAssociation {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct AssociationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate::not_blank", message = "Association title cannot be empty"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AssociationUpdate {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
