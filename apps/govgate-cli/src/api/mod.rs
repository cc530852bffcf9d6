//! API client modules for the govgate backend

mod auth;
mod client;
pub mod dashboard;
mod grants;
mod logs;
mod permissions;
mod profile;
mod requests;
pub mod resource;
mod retry;

pub use auth::{login, login_body, register};
pub use client::ApiClient;
pub use dashboard::{load_dashboard, DashboardSummary};
pub use grants::decide_grant;
pub use logs::{ensure_available, list_logs};
pub use permissions::{create_permission, delete_permission, get_permission, list_permissions};
pub use profile::{get_profile, parse_assignments, update_profile};
pub use requests::{approve, create_request, get_request_with_retry, reject, update_request};
pub use retry::RetryPolicy;
