//! Wire models for the access-management backend
//!
//! Field names follow the backend exactly (`Title`, `Granted`, `Decline`,
//! `StartDate`, ...); the identifier is the lower-case `id`. Relations come
//! back either as a bare id or as a nested object depending on the
//! serializer, so they are modelled as [`Ref`].

mod administrator;
mod association;
mod citizen;
mod department;
mod grant;
mod grantee;
mod log;
mod permission;
mod public_service;
mod request;

pub use administrator::{Administrator, NewAdministrator};
pub use association::{Association, AssociationUpdate, NewAssociation};
pub use citizen::{Citizen, CitizenUpdate, Registration};
pub use department::{Department, DepartmentUpdate, NewDepartment};
pub use grant::{Grant, GrantUpdate};
pub use grantee::{Grantee, NewGrantee};
pub use log::{most_recent, LogEntry, LogKind};
pub use permission::{NewPermission, Permission, PermissionScope};
pub use public_service::{NewPublicService, PublicService, PublicServiceUpdate};
pub use request::{DecisionPayload, NewRequest, Request, RequestUpdate};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Records that can identify and name themselves when embedded in another
/// record.
pub trait Labelled {
    fn uuid(&self) -> Uuid;
    fn label(&self) -> String;
}

/// A relation to another record.
///
/// The backend sends a bare id from write serializers and a nested object
/// from read serializers. Anything else (a partial object without `id`, an
/// integer key) is kept as an opaque value rather than failing the parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(Uuid),
    Embedded(Box<T>),
    Opaque(serde_json::Value),
}

impl<T: Labelled> Ref<T> {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            Ref::Id(id) => Some(*id),
            Ref::Embedded(inner) => Some(inner.uuid()),
            Ref::Opaque(_) => None,
        }
    }

    /// Display name for tables: the embedded record's label, else the id.
    pub fn label(&self) -> String {
        match self {
            Ref::Id(id) => id.to_string(),
            Ref::Embedded(inner) => inner.label(),
            Ref::Opaque(value) => opaque_label(value),
        }
    }
}

impl<T> Ref<T> {
    pub fn embedded(&self) -> Option<&T> {
        match self {
            Ref::Embedded(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Best-effort label for values the client cannot type.
fn opaque_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Object(map) => ["Title", "UserName", "GranteeUserName", "Name"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string()),
        _ => "-".to_string(),
    }
}

/// Label of an optional relation, `-` when absent.
pub fn ref_label<T: Labelled>(value: &Option<Ref<T>>) -> String {
    value
        .as_ref()
        .map(Ref::label)
        .unwrap_or_else(|| "-".to_string())
}

/// Relation that read serializers send either as a single record or as a
/// list. Both decode to a list; `null` decodes to an empty one.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<Ref<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<Ref<T>>),
        One(Ref<T>),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_parses_bare_hex_id() {
        let value: Ref<Department> =
            serde_json::from_str("\"550e8400e29b41d4a716446655440000\"").unwrap();
        assert!(matches!(value, Ref::Id(_)));
        assert_eq!(
            value.id().unwrap().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_ref_parses_embedded_object() {
        let value: Ref<Department> = serde_json::from_str(
            r#"{"id": "550e8400e29b41d4a716446655440000", "Title": "Transport"}"#,
        )
        .unwrap();
        assert_eq!(value.label(), "Transport");
        assert!(value.embedded().is_some());
    }

    #[test]
    fn test_ref_keeps_unknown_shapes() {
        let value: Ref<Department> = serde_json::from_str(r#"{"Title": "No id"}"#).unwrap();
        assert!(value.id().is_none());
        assert_eq!(value.label(), "No id");

        let value: Ref<Department> = serde_json::from_str("17").unwrap();
        assert_eq!(value.label(), "17");
    }

    #[test]
    fn test_ref_label_absent() {
        assert_eq!(ref_label::<Department>(&None), "-");
    }
}
