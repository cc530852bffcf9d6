//! Local data models: stored tokens, session, token endpoint payloads

pub mod credentials;
pub mod session;
pub mod token;

pub use credentials::Credentials;
pub use session::Session;
pub use token::{JwtClaims, LoginResponse, RefreshResponse};
