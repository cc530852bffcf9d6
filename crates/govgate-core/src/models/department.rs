use super::{Administrator, Labelled, Ref};
use crate::error::Result;
use crate::ids::DepartmentId;
use crate::validate::{self, TITLE_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Top-level organizational unit owned by one administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    #[serde(rename = "id")]
    pub id: DepartmentId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub administrator: Option<Ref<Administrator>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Labelled for Department {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewDepartment {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter a department title"),
        length(max = TITLE_MAX_LEN, message = "Title must be at most 100 characters")
    )]
    pub title: String,
    pub administrator: Uuid,
    #[validate(custom(
        function = "validate::not_blank",
        message = "Please enter a department description"
    ))]
    pub description: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate::not_blank", message = "Please enter a telephone number"))]
    pub telephone: String,
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website: String,
}

impl NewDepartment {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

/// PATCH payload; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "validate::not_blank", message = "Department title cannot be empty"),
        length(max = TITLE_MAX_LEN, message = "Title must be at most 100 characters")
    )]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website: Option<String>,
}

impl DepartmentUpdate {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
