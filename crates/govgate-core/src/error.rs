//! Error Types
//!
//! Failures the core can detect without talking to the backend: malformed
//! input on write payloads, inverted time windows, unknown role or scope
//! names.

use thiserror::Error;

/// Standardized error type for govgate-core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input validation failure on a write payload.
    #[error("{message}")]
    Validation {
        /// The PascalCase wire field that failed validation
        field: String,
        /// Human-readable description, suitable for direct display
        message: String,
    },

    /// A time window whose end does not come after its start.
    #[error("Invalid time window: end ({end}) must be after start ({start})")]
    InvalidWindow {
        /// RFC 3339 start instant
        start: String,
        /// RFC 3339 end instant
        end: String,
    },

    /// A name that does not match any known variant (role, scope, status).
    #[error("Unknown {kind} '{value}'. Expected one of: {expected}")]
    UnknownVariant {
        /// What was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
        /// Comma-separated accepted values
        expected: &'static str,
    },
}

impl CoreError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The wire field a validation error refers to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Collapse derive-level failures into one `Validation` error.
///
/// When several fields fail, the first by wire name is reported so the
/// output does not depend on hash order.
impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut failures: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(name, list)| {
                let error = list.first()?;
                let field = crate::validate::wire_field(&name.to_string(), error);
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
                Some((field, message))
            })
            .collect();
        failures.sort();
        match failures.into_iter().next() {
            Some((field, message)) => Self::Validation { field, message },
            None => Self::validation("payload", "Invalid input"),
        }
    }
}

/// Type alias for Results using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;
