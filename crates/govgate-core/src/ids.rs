//! Strongly Typed Identifiers
//!
//! Every backend record carries a `PublicId` UUID, exposed on the wire as the
//! lower-case `id` field. The backend serializes it in the 32-digit `hex`
//! form; these newtypes accept both that and the hyphenated form, and always
//! display hyphenated.
//!
//! # Example
//!
//! ```
//! use govgate_core::{GrantId, RequestId};
//!
//! let request: RequestId = "550e8400e29b41d4a716446655440000".parse().unwrap();
//! assert_eq!(request.to_string(), "550e8400-e29b-41d4-a716-446655440000");
//!
//! // Type safety: a GrantId cannot be passed where a RequestId is expected
//! fn requires_request(id: RequestId) -> String {
//!     id.to_string()
//! }
//! let _ = requires_request(request);
//! // requires_request(GrantId::new()); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// First eight hex digits, for compact table columns.
            #[must_use]
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier of a registered citizen account.
    CitizenId
);

define_id!(
    /// Identifier of a department, the top-level organizational unit.
    DepartmentId
);

define_id!(
    /// Identifier of an association within a department.
    AssociationId
);

define_id!(
    /// Identifier of a public service offered by an association.
    ServiceId
);

define_id!(
    /// Identifier of a citizen's access request against a service.
    RequestId
);

define_id!(
    /// Identifier of the grant (decision record) attached to a request.
    GrantId
);

define_id!(
    /// Identifier of a grantee operator account.
    GranteeId
);

define_id!(
    /// Identifier of a department administrator account.
    AdministratorId
);

define_id!(
    /// Identifier of a department, association or service permission window.
    PermissionId
);

define_id!(
    /// Identifier of an audit log entry.
    LogId
);

#[cfg(test)]
mod tests {
    use super::*;

    mod request_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = RequestId::new();
            let id_str = id.to_string();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id_str.len(), 36);
            assert!(id_str.contains('-'));
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = RequestId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
        }

        #[test]
        fn test_default_creates_new_id() {
            assert_ne!(RequestId::default(), RequestId::default());
        }

        #[test]
        fn test_short_is_first_eight_hex_digits() {
            let id: RequestId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
            assert_eq!(id.short(), "550e8400");
        }
    }

    mod from_str_tests {
        use super::*;

        #[test]
        fn test_parse_hyphenated() {
            let id: GrantId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_backend_hex_form() {
            let id: GrantId = "550e8400e29b41d4a716446655440000".parse().unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_trims_whitespace() {
            let id: CitizenId = "  550e8400e29b41d4a716446655440000\n".parse().unwrap();
            assert_eq!(id.short(), "550e8400");
        }

        #[test]
        fn test_parse_invalid_returns_error() {
            let err = "not-a-uuid".parse::<DepartmentId>().unwrap_err();
            assert_eq!(err.id_type, "DepartmentId");
            assert!(!err.message.is_empty());
            assert!(err.to_string().contains("Failed to parse DepartmentId"));
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_deserializes_backend_hex() {
            let id: ServiceId = serde_json::from_str("\"550e8400e29b41d4a716446655440000\"").unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_serializes_as_plain_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let json = serde_json::to_string(&PermissionId::from_uuid(uuid)).unwrap();
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
        }
    }
}
