use super::{Association, Citizen, Labelled, Ref};
use crate::error::Result;
use crate::ids::GranteeId;
use crate::validate::{self, USERNAME_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Operator account that processes requests for one association's services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Grantee {
    #[serde(rename = "id")]
    pub id: GranteeId,
    #[serde(default)]
    pub grantee_user_name: String,
    #[serde(default)]
    pub citizen: Option<Ref<Citizen>>,
    #[serde(default)]
    pub association: Option<Ref<Association>>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Labelled for Grantee {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.grantee_user_name.clone()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewGrantee {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter a grantee username"),
        length(
            max = USERNAME_MAX_LEN,
            message = "GranteeUserName must be at most 100 characters"
        )
    )]
    pub grantee_user_name: String,
    pub citizen: Uuid,
    pub association: Uuid,
}

impl NewGrantee {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_grantee() {
        let grantee: Grantee = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "GranteeUserName": "clerk1"}"#,
        )
        .unwrap();
        assert_eq!(grantee.label(), "clerk1");
        assert!(grantee.association.is_none());
    }

    #[test]
    fn test_new_grantee_validation() {
        let grantee = NewGrantee {
            grantee_user_name: " ".into(),
            citizen: Uuid::nil(),
            association: Uuid::nil(),
        };
        assert_eq!(
            grantee.validate().unwrap_err().to_string(),
            "Please enter a grantee username"
        );
    }
}
