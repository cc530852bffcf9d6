use super::{Association, Citizen, Department, Grantee, Labelled, PublicService, Ref};
use crate::error::{CoreError, Result};
use crate::ids::PermissionId;
use crate::validate::{self, TITLE_MAX_LEN};
use crate::window::PermissionWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// What a permission is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionScope {
    Department,
    Association,
    Service,
}

impl PermissionScope {
    pub const ALL: [PermissionScope; 3] = [
        PermissionScope::Department,
        PermissionScope::Association,
        PermissionScope::Service,
    ];

    /// Segment in `/api/{role}/permission/{scope}/`.
    pub fn segment(&self) -> &'static str {
        match self {
            PermissionScope::Department => "department",
            PermissionScope::Association => "association",
            PermissionScope::Service => "service",
        }
    }

    /// Wire field naming the scoped record.
    pub fn target_field(&self) -> &'static str {
        match self {
            PermissionScope::Department => "Department",
            PermissionScope::Association => "Association",
            PermissionScope::Service => "PublicService",
        }
    }
}

impl fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for PermissionScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "department" => Ok(PermissionScope::Department),
            "association" => Ok(PermissionScope::Association),
            "service" | "publicservice" => Ok(PermissionScope::Service),
            _ => Err(CoreError::UnknownVariant {
                kind: "permission scope",
                value: s.to_string(),
                expected: "department, association, service",
            }),
        }
    }
}

/// A time-boxed authorization window on a department, association or
/// service, optionally limited to specific citizens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Permission {
    #[serde(rename = "id")]
    pub id: PermissionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub citizens: Vec<Ref<Citizen>>,
    #[serde(default, with = "crate::time::opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: Option<bool>,
    /// Server's view of the window at response time.
    #[serde(default)]
    pub permission_open: Option<bool>,
    #[serde(default)]
    pub department: Option<Ref<Department>>,
    #[serde(default)]
    pub association: Option<Ref<Association>>,
    #[serde(default)]
    pub public_service: Option<Ref<PublicService>>,
    /// Read serializers send one grantee object; older payloads a list.
    #[serde(default, deserialize_with = "super::one_or_many")]
    pub grantee: Vec<Ref<Grantee>>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Permission {
    /// The scope implied by whichever target field is present.
    pub fn scope(&self) -> Option<PermissionScope> {
        if self.public_service.is_some() {
            Some(PermissionScope::Service)
        } else if self.association.is_some() {
            Some(PermissionScope::Association)
        } else if self.department.is_some() {
            Some(PermissionScope::Department)
        } else {
            None
        }
    }

    pub fn target_label(&self) -> String {
        match self.scope() {
            Some(PermissionScope::Service) => super::ref_label(&self.public_service),
            Some(PermissionScope::Association) => super::ref_label(&self.association),
            Some(PermissionScope::Department) => super::ref_label(&self.department),
            None => "-".to_string(),
        }
    }

    /// `None` when either bound is missing or the bounds are inverted.
    pub fn window(&self) -> Option<PermissionWindow> {
        PermissionWindow::new(self.start_time?, self.end_time?).ok()
    }

    /// `start <= now <= end`, checked on the raw bounds so a window whose
    /// start equals its end is open at that instant.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => start <= now && now <= end,
            _ => false,
        }
    }

    /// Open and not switched off.
    pub fn is_effective(&self, now: DateTime<Utc>) -> bool {
        self.active != Some(false) && self.is_open(now)
    }
}

impl Labelled for Permission {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// Create payload for any permission scope.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "single_target"))]
pub struct NewPermission {
    #[validate(
        custom(function = "validate::not_blank", message = "Please enter a permission name"),
        length(max = TITLE_MAX_LEN, message = "Name must be at most 100 characters")
    )]
    pub name: String,
    pub description: String,
    pub citizens: Vec<Uuid>,
    #[serde(serialize_with = "crate::time::serialize")]
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "crate::time::serialize")]
    pub end_time: DateTime<Utc>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_service: Option<Uuid>,
}

fn single_target(permission: &NewPermission) -> std::result::Result<(), ValidationError> {
    let targets = [
        permission.department,
        permission.association,
        permission.public_service,
    ]
    .iter()
    .filter(|target| target.is_some())
    .count();
    if targets != 1 {
        return Err(validate::blame(
            ValidationError::new("single_target"),
            "PublicService",
            "A permission must target exactly one department, association or service",
        ));
    }
    Ok(())
}

impl NewPermission {
    pub fn new(
        scope: PermissionScope,
        target: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        window: PermissionWindow,
    ) -> Self {
        let mut permission = Self {
            name: name.into(),
            description: description.into(),
            citizens: Vec::new(),
            start_time: window.start(),
            end_time: window.end(),
            active: true,
            department: None,
            association: None,
            public_service: None,
        };
        match scope {
            PermissionScope::Department => permission.department = Some(target),
            PermissionScope::Association => permission.association = Some(target),
            PermissionScope::Service => permission.public_service = Some(target),
        }
        permission
    }

    pub fn with_citizens(mut self, citizens: Vec<Uuid>) -> Self {
        self.citizens = citizens;
        self
    }

    pub fn validate(&self) -> Result<()> {
        Validate::validate(self)?;
        PermissionWindow::new(self.start_time, self.end_time)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn permission(json: &str) -> Permission {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scope_from_target() {
        let p = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "Name": "Night access",
                "PublicService": {"id": "6ba7b8109dad11d180b400c04fd430c8", "Title": "Licensing"}
            }"#,
        );
        assert_eq!(p.scope(), Some(PermissionScope::Service));
        assert_eq!(p.target_label(), "Licensing");
    }

    #[test]
    fn test_effective_requires_active_and_open() {
        let open = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "StartTime": "2026-10-01",
                "EndTime": "2026-11-01"
            }"#,
        );
        assert!(open.is_open(now()));
        assert!(open.is_effective(now()));

        let mut off = open.clone();
        off.active = Some(false);
        assert!(!off.is_effective(now()));

        assert!(!open.is_open(now() + Duration::days(30)));
    }

    #[test]
    fn test_single_instant_window_is_open_at_that_instant() {
        let p = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "StartTime": "2026-10-16T12:00:00Z",
                "EndTime": "2026-10-16T12:00:00Z"
            }"#,
        );
        assert!(p.is_open(now()));
        assert!(p.is_effective(now()));
        assert!(!p.is_open(now() + Duration::seconds(1)));
        assert!(!p.is_open(now() - Duration::seconds(1)));
    }

    #[test]
    fn test_inverted_bounds_are_closed() {
        let p = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "StartTime": "2026-11-01",
                "EndTime": "2026-10-01"
            }"#,
        );
        assert!(p.window().is_none());
        assert!(!p.is_open(now()));
    }

    #[test]
    fn test_grantee_accepts_single_object() {
        let p = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "Grantee": {"id": "6ba7b8109dad11d180b400c04fd430c8", "GranteeUserName": "clerk1"}
            }"#,
        );
        assert_eq!(p.grantee.len(), 1);
        assert_eq!(p.grantee[0].label(), "clerk1");

        let p = permission(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "Grantee": ["6ba7b8109dad11d180b400c04fd430c8"]
            }"#,
        );
        assert_eq!(p.grantee.len(), 1);

        let p = permission(r#"{"id": "550e8400e29b41d4a716446655440000", "Grantee": null}"#);
        assert!(p.grantee.is_empty());
    }

    #[test]
    fn test_missing_bounds_are_closed() {
        let p = permission(r#"{"id": "550e8400e29b41d4a716446655440000"}"#);
        assert!(p.window().is_none());
        assert!(!p.is_open(now()));
    }

    #[test]
    fn test_new_permission_sets_one_target() {
        let window = PermissionWindow::starting_at(now());
        let p = NewPermission::new(
            PermissionScope::Association,
            Uuid::nil(),
            "Quarterly audit",
            "Audit window",
            window,
        );
        assert!(p.validate().is_ok());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("Association").is_some());
        assert!(json.get("Department").is_none());
        assert_eq!(json["StartTime"], "2026-10-16T12:00:00Z");
        assert_eq!(json["EndTime"], "2026-11-15T12:00:00Z");
    }

    #[test]
    fn test_new_permission_rules() {
        let window = PermissionWindow::starting_at(now());
        let mut p = NewPermission::new(
            PermissionScope::Service,
            Uuid::nil(),
            " ",
            "",
            window,
        );
        let err = p.validate().unwrap_err();
        assert_eq!(err.field(), Some("Name"));
        assert_eq!(err.to_string(), "Please enter a permission name");

        p.name = "Night access".into();
        p.department = Some(Uuid::nil());
        let err = p.validate().unwrap_err();
        assert_eq!(err.field(), Some("PublicService"));

        p.department = None;
        p.end_time = p.start_time;
        assert!(matches!(
            p.validate().unwrap_err(),
            CoreError::InvalidWindow { .. }
        ));
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!(
            "PublicService".parse::<PermissionScope>().unwrap(),
            PermissionScope::Service
        );
        assert!("county".parse::<PermissionScope>().is_err());
    }
}
