use super::{Grantee, Labelled, Ref, Request};
use crate::error::Result;
use crate::ids::GrantId;
use crate::status::{Decided, Decision};
use crate::validate::{self, GRANT_MESSAGE_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// The decision record attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Grant {
    #[serde(rename = "id")]
    pub id: GrantId,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request: Option<Ref<Request>>,
    #[serde(default)]
    pub grantee: Option<Ref<Grantee>>,
    #[serde(default)]
    pub decline: bool,
    /// Computed server-side; some serializers omit it.
    #[serde(default)]
    pub granted: Option<bool>,
    #[serde(default, with = "crate::time::opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Grant {
    pub fn request_label(&self) -> String {
        super::ref_label(&self.request)
    }

    pub fn grantee_label(&self) -> String {
        super::ref_label(&self.grantee)
    }
}

impl Decided for Grant {
    /// Without a `Granted` flag, a grant counts as granted once it is not
    /// declined and its `StartDate` has been reached. `EndDate` is left to
    /// status derivation so expiry stays visible.
    fn decision(&self, now: DateTime<Utc>) -> Decision {
        let granted = self.granted.unwrap_or_else(|| {
            !self.decline && self.start_date.is_some_and(|start| start <= now)
        });
        Decision::new(granted, self.decline, self.end_date)
    }
}

impl Labelled for Grant {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        format!("grant {}", self.id.short())
    }
}

/// PATCH payload for a grant.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "grant_dates"))]
pub struct GrantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::time::opt"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::time::opt"
    )]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(
        max = GRANT_MESSAGE_MAX_LEN,
        message = "Message must be at most 300 characters"
    ))]
    pub message: Option<String>,
}

fn grant_dates(update: &GrantUpdate) -> std::result::Result<(), ValidationError> {
    validate::date_order(update.start_date, update.end_date)
}

impl GrantUpdate {
    /// Approve from `start` (until `end`, if given).
    pub fn approve(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            decline: Some(false),
            start_date: Some(start),
            end_date: end,
            message: None,
        }
    }

    pub fn decline() -> Self {
        Self {
            decline: Some(true),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::GrantStatus;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn grant(json: &str) -> Grant {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_explicit_granted_flag_is_used() {
        let g = grant(r#"{"id": "550e8400e29b41d4a716446655440000", "Granted": true}"#);
        assert_eq!(GrantStatus::of(&g, now()), GrantStatus::Active);
    }

    #[test]
    fn test_granted_inferred_from_start_date() {
        let started = grant(
            r#"{"id": "550e8400e29b41d4a716446655440000", "StartDate": "2026-10-01T00:00:00Z"}"#,
        );
        assert_eq!(GrantStatus::of(&started, now()), GrantStatus::Active);

        let future = grant(
            r#"{"id": "550e8400e29b41d4a716446655440000", "StartDate": "2027-01-01T00:00:00Z"}"#,
        );
        assert_eq!(GrantStatus::of(&future, now()), GrantStatus::Pending);

        let unset = grant(r#"{"id": "550e8400e29b41d4a716446655440000"}"#);
        assert_eq!(GrantStatus::of(&unset, now()), GrantStatus::Pending);
    }

    #[test]
    fn test_inferred_grant_expires() {
        let g = grant(
            r#"{
                "id": "550e8400e29b41d4a716446655440000",
                "StartDate": "2026-01-01",
                "EndDate": "2026-02-01"
            }"#,
        );
        assert_eq!(GrantStatus::of(&g, now()), GrantStatus::Expired);
    }

    #[test]
    fn test_declined_wins_over_start_date() {
        let g = grant(
            r#"{"id": "550e8400e29b41d4a716446655440000", "Decline": true, "StartDate": "2026-01-01"}"#,
        );
        assert_eq!(GrantStatus::of(&g, now()), GrantStatus::Declined);
    }

    #[test]
    fn test_update_constructors() {
        let update = GrantUpdate::approve(now(), Some(now() + Duration::days(30)))
            .with_message("Approved for 30 days");
        assert!(update.validate().is_ok());
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["Decline"], false);
        assert_eq!(json["StartDate"], "2026-10-16T12:00:00Z");

        let json = serde_json::to_value(GrantUpdate::decline()).unwrap();
        assert_eq!(json, serde_json::json!({"Decline": true}));
    }

    #[test]
    fn test_update_rejects_inverted_dates_and_long_message() {
        let err = GrantUpdate::approve(now(), Some(now())).validate().unwrap_err();
        assert_eq!(err.field(), Some("EndDate"));

        let err = GrantUpdate::decline()
            .with_message("x".repeat(301))
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("Message"));
    }
}
