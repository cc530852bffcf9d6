use super::{Citizen, Grant, Labelled, PublicService, Ref};
use crate::error::Result;
use crate::ids::RequestId;
use crate::status::{Decided, Decision};
use crate::validate::{self, GRANT_MESSAGE_MAX_LEN, MESSAGE_MAX_LEN, SUBJECT_MAX_LEN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A citizen's request for access to a public service.
///
/// Read serializers either flatten the grant outcome onto the request
/// (`Granted`, `Decline`, `EndDate`) or embed the whole `Grant`; both shapes
/// are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Request {
    #[serde(rename = "id")]
    pub id: RequestId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub citizen: Option<Ref<Citizen>>,
    #[serde(default)]
    pub public_service: Option<Ref<PublicService>>,
    #[serde(default)]
    pub grant: Option<Ref<Grant>>,
    #[serde(default)]
    pub granted: Option<bool>,
    #[serde(default)]
    pub decline: Option<bool>,
    #[serde(default, with = "crate::time::opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::time::opt")]
    pub updated: Option<DateTime<Utc>>,
}

impl Request {
    /// Title of the requested service, or its id when not embedded.
    pub fn service_label(&self) -> String {
        super::ref_label(&self.public_service)
    }

    pub fn citizen_label(&self) -> String {
        super::ref_label(&self.citizen)
    }

    fn has_own_decision(&self) -> bool {
        self.granted.is_some() || self.decline.is_some()
    }
}

impl Decided for Request {
    fn decision(&self, now: DateTime<Utc>) -> Decision {
        let embedded = self.grant.as_ref().and_then(Ref::embedded);
        if self.has_own_decision() {
            let end_date = self
                .end_date
                .or_else(|| embedded.and_then(|grant| grant.end_date));
            return Decision::new(
                self.granted.unwrap_or(false),
                self.decline.unwrap_or(false),
                end_date,
            );
        }
        match embedded {
            Some(grant) => grant.decision(now),
            None => Decision::default(),
        }
    }
}

impl Labelled for Request {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        self.subject.clone()
    }
}

/// Payload for creating a request. Mirrors the citizen request form.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct NewRequest {
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter a subject for your request"
        ),
        length(
            max = SUBJECT_MAX_LEN,
            message = "Subject must be at most 50 characters"
        )
    )]
    pub subject: String,
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter a message describing your request"
        ),
        length(
            max = MESSAGE_MAX_LEN,
            message = "Message must be at most 500 characters"
        )
    )]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Please select a service for your request"))]
    pub public_service: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewRequest {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }

    /// Copy with surrounding whitespace removed from the text fields.
    pub fn trimmed(&self) -> Self {
        Self {
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            ..self.clone()
        }
    }
}

/// PATCH payload for a request.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct RequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter a subject for your request"
        ),
        length(
            max = SUBJECT_MAX_LEN,
            message = "Subject must be at most 50 characters"
        )
    )]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(
            function = "validate::not_blank",
            message = "Please enter a message describing your request"
        ),
        length(
            max = MESSAGE_MAX_LEN,
            message = "Message must be at most 500 characters"
        )
    )]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_service: Option<Uuid>,
}

impl RequestUpdate {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.message.is_none() && self.public_service.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}

/// Body of `POST .../request/{id}/approve/` and `.../reject/`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "decision_dates"))]
pub struct DecisionPayload {
    #[validate(length(
        max = GRANT_MESSAGE_MAX_LEN,
        message = "Message must be at most 300 characters"
    ))]
    pub message: String,
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
}

fn decision_dates(payload: &DecisionPayload) -> std::result::Result<(), ValidationError> {
    validate::date_order(payload.start_date, payload.end_date)
}

impl DecisionPayload {
    pub fn validate(&self) -> Result<()> {
        Ok(Validate::validate(self)?)
    }
}
