//! Input checks shared by the write payloads
//!
//! Payloads derive `validator::Validate`; length, e-mail, URL and range
//! rules come from the crate. The functions here cover what it cannot say:
//! trimmed-blank text and start/end ordering. Failures convert into
//! `CoreError::Validation` naming the PascalCase wire field, so the CLI can
//! point at the flag that needs fixing.

use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use validator::{ValidateEmail, ValidationError};

/// Backend column widths.
pub const SUBJECT_MAX_LEN: u64 = 50;
pub const MESSAGE_MAX_LEN: u64 = 500;
pub const GRANT_MESSAGE_MAX_LEN: u64 = 300;
pub const TITLE_MAX_LEN: u64 = 100;
pub const MACHINE_NAME_MAX_LEN: u64 = 150;
pub const USERNAME_MAX_LEN: u64 = 100;
pub const ADMIN_USERNAME_MAX_LEN: u64 = 50;
pub const GRANTEE_LIMIT_MAX: u32 = 99;

/// Key under which schema-level errors record the field they blame.
const FIELD_PARAM: &str = "field";

/// Fails when the value is empty or only whitespace.
///
/// `length(min = 1)` would accept `"   "`, which the backend rejects.
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("This field cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

/// When both ends are set, `end` must come strictly after `start`.
pub fn date_order(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> std::result::Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(blame(
                ValidationError::new("date_order"),
                "EndDate",
                "EndDate must be after StartDate",
            ));
        }
    }
    Ok(())
}

/// Attach a wire field and message to a schema-level error.
pub(crate) fn blame(
    mut err: ValidationError,
    field: &'static str,
    message: &'static str,
) -> ValidationError {
    err.message = Some(message.into());
    err.add_param(FIELD_PARAM.into(), &field);
    err
}

/// Standalone e-mail check for values that are not part of a payload,
/// such as the login prompt.
pub fn email(field: &'static str, value: &str) -> Result<()> {
    let value = value.trim();
    if !value.validate_email() {
        return Err(CoreError::validation(
            field,
            format!("'{value}' is not a valid email address"),
        ));
    }
    Ok(())
}

/// Map a struct field name from `ValidationErrors` to its wire name.
pub(crate) fn wire_field(name: &str, error: &ValidationError) -> String {
    match name {
        "__all__" => error
            .params
            .get(FIELD_PARAM)
            .and_then(|v| v.as_str())
            .unwrap_or("payload")
            .to_string(),
        "dob" => "DOB".to_string(),
        "url" => "URL".to_string(),
        "password" => "password".to_string(),
        other => other
            .split('_')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect(),
    }
}
