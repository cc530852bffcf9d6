//! CLI command implementations

pub mod administrators;
pub mod associations;
pub mod citizens;
pub mod dashboard;
pub mod departments;
pub mod grantees;
pub mod grants;
pub mod login;
pub mod logout;
pub mod logs;
pub mod permissions;
pub mod profile;
pub mod register;
pub mod requests;
pub mod services;
pub mod whoami;

use crate::api::ApiClient;
use crate::error::{CliError, CliResult};
use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use govgate_core::models::{Labelled, Ref};
use govgate_core::Role;
use std::io::IsTerminal;
use uuid::Uuid;

/// Options shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// `--role`, overriding the role stored with the session
    pub role: Option<Role>,
}

impl Context {
    pub fn client(&self) -> CliResult<ApiClient> {
        ApiClient::from_defaults(self.role)
    }
}

/// Parse an id in hyphenated or plain 32-hex form.
pub(crate) fn parse_uuid(id_str: &str, resource: &str) -> CliResult<Uuid> {
    Uuid::parse_str(id_str.trim()).map_err(|_| {
        CliError::Validation(format!(
            "Invalid {resource} ID '{id_str}'. Must be a valid UUID."
        ))
    })
}

pub(crate) fn parse_uuid_list(input: &str, resource: &str) -> CliResult<Vec<Uuid>> {
    crate::output::parse_comma_list(input)
        .iter()
        .map(|id| parse_uuid(id, resource))
        .collect()
}

/// Parse a date (`2026-10-16`) or RFC 3339 timestamp.
pub(crate) fn parse_when(value: &str, field: &str) -> CliResult<DateTime<Utc>> {
    govgate_core::time::parse_timestamp(value).ok_or_else(|| {
        CliError::Validation(format!(
            "Invalid {field} '{value}'. Use YYYY-MM-DD or an RFC 3339 timestamp."
        ))
    })
}

pub(crate) fn parse_optional_when(
    value: Option<&str>,
    field: &str,
) -> CliResult<Option<DateTime<Utc>>> {
    value.map(|v| parse_when(v, field)).transpose()
}

/// Ask before a destructive action. `force` skips the prompt; without a
/// terminal and without `force` the action is refused.
pub(crate) fn confirm(prompt: String, force: bool) -> CliResult<bool> {
    if force {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::Validation(
            "Cannot confirm in non-interactive mode. Use --force to skip confirmation."
                .to_string(),
        ));
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Refuse a partial update that would change nothing.
pub(crate) fn ensure_changes<T: serde::Serialize>(update: &T) -> CliResult<()> {
    let value = serde_json::to_value(update)?;
    if value.as_object().is_some_and(|fields| fields.is_empty()) {
        return Err(CliError::Validation(
            "Nothing to update. Pass at least one field option.".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn ref_label<T: Labelled>(value: &Option<Ref<T>>) -> String {
    govgate_core::models::ref_label(value)
}

pub(crate) fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_accepts_hex_form() {
        let hex = "550e8400e29b41d4a716446655440000";
        let dashed = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(
            parse_uuid(hex, "request").unwrap(),
            parse_uuid(dashed, "request").unwrap()
        );
    }

    #[test]
    fn test_parse_uuid_invalid() {
        let err = parse_uuid("42", "grant").unwrap_err();
        assert!(err.to_string().contains("Invalid grant ID '42'"));
    }

    #[test]
    fn test_parse_uuid_list() {
        let ids = parse_uuid_list(
            "550e8400e29b41d4a716446655440000, 6ba7b8109dad11d180b400c04fd430c8",
            "grantee",
        )
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert!(parse_uuid_list("x", "grantee").is_err());
    }

    #[test]
    fn test_parse_when() {
        let date = parse_when("2026-10-16", "start").unwrap();
        assert_eq!(date.to_rfc3339(), "2026-10-16T00:00:00+00:00");
        assert!(parse_when("16/10/2026", "start").is_err());
        assert!(parse_optional_when(None, "end").unwrap().is_none());
    }

    #[test]
    fn test_confirm_force_skips_prompt() {
        assert!(confirm("Delete?".to_string(), true).unwrap());
    }

    #[test]
    fn test_ensure_changes() {
        let empty = govgate_core::models::DepartmentUpdate::default();
        assert!(matches!(ensure_changes(&empty), Err(CliError::Validation(_))));
        let update = govgate_core::models::DepartmentUpdate {
            title: Some("Transport".to_string()),
            ..Default::default()
        };
        assert!(ensure_changes(&update).is_ok());
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("x")), "x");
    }
}
