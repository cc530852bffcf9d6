//! Profile of the logged-in account
//!
//! Citizens have a dedicated `profile/` endpoint. Staff roles read their own
//! record from the role's self collection, which the backend filters to the
//! caller, and update it by id.

use crate::api::resource::ListEnvelope;
use crate::api::ApiClient;
use crate::error::{CliError, CliResult};
use govgate_core::Role;
use serde_json::{Map, Value};

pub async fn get_profile(client: &ApiClient) -> CliResult<Value> {
    let url = client.url(client.role().self_collection());
    if client.role() == Role::Citizen {
        return client.get_json(&url, "profile").await;
    }

    let envelope: ListEnvelope<Value> = client.get_json(&url, "profile").await?;
    envelope
        .into_vec()
        .into_iter()
        .next()
        .ok_or_else(|| CliError::NotFound("profile".to_string()))
}

/// Apply `changes` to the profile and return the updated record.
pub async fn update_profile(client: &ApiClient, changes: &Map<String, Value>) -> CliResult<Value> {
    if changes.is_empty() {
        return Err(CliError::Validation("Nothing to update".to_string()));
    }

    let collection = client.role().self_collection();
    let url = if client.role() == Role::Citizen {
        client.url(collection)
    } else {
        let current = get_profile(client).await?;
        let id = current
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| CliError::Api {
                status: 200,
                message: "Profile record has no id".to_string(),
            })?;
        client.url(&format!("{collection}/{id}"))
    };

    client.patch_json(&url, changes, "profile").await
}

/// Parse `KEY=VALUE` pairs. Values that parse as JSON (numbers, booleans,
/// null, quoted strings) keep their type; anything else is a string.
pub fn parse_assignments(pairs: &[String]) -> CliResult<Map<String, Value>> {
    let mut changes = Map::new();
    for pair in pairs {
        let (key, raw) = pair.split_once('=').ok_or_else(|| {
            CliError::Validation(format!("Expected KEY=VALUE, got '{pair}'"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Validation(format!("Missing key in '{pair}'")));
        }
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Null | Value::String(_))) => value,
            _ => Value::String(raw.to_string()),
        };
        changes.insert(key.to_string(), value);
    }
    Ok(changes)
}
