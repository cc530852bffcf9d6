//! govgate Core Library
//!
//! Shared types for the government-service access backend client.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (CitizenId, RequestId, GrantId, ...)
//! - [`role`] - Dashboard roles and their API path segments
//! - [`models`] - PascalCase wire models and write payloads
//! - [`status`] - Grant status derivation (Pending, Active, Expired, Declined)
//! - [`window`] - Time-boxed permission windows
//! - [`search`] - Client-side search and status filtering
//! - [`validate`] - Input checks for write payloads
//! - [`error`] - Standardized error types (CoreError)
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use govgate_core::{Decision, GrantStatus};
//!
//! let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let expired = Decision::new(true, false, Some(now - chrono::Duration::days(1)));
//! assert_eq!(GrantStatus::derive(&expired, now), GrantStatus::Expired);
//! ```

pub mod error;
pub mod ids;
pub mod models;
pub mod role;
pub mod search;
pub mod status;
pub mod time;
pub mod validate;
pub mod window;

pub use error::{CoreError, Result};
pub use ids::{
    AdministratorId, AssociationId, CitizenId, DepartmentId, GrantId, GranteeId, LogId,
    ParseIdError, PermissionId, RequestId, ServiceId,
};
pub use role::{default_role_username, Role};
pub use search::{filter_by_query, filter_by_status, matches_query, Searchable};
pub use status::{Decided, Decision, GrantStatus, StatusCounts};
pub use window::{PermissionWindow, DEFAULT_WINDOW_DAYS};
