//! Session model: which account and role the stored tokens belong to

use crate::config::ConfigPaths;
use crate::error::CliResult;
use crate::models::JwtClaims;
use govgate_core::Role;
use serde::{Deserialize, Serialize};

/// Logged-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Role the tokens were issued for; selects the `/api/{role}/` tree
    pub role: Role,

    pub user_id: Option<String>,

    pub name: Option<String>,

    pub email: Option<String>,
}

impl Session {
    /// Build a session from the access token claims, falling back to the
    /// account record returned by the login endpoint.
    pub fn from_login(
        role: Role,
        access_token: &str,
        user: Option<&serde_json::Value>,
        login_email: &str,
    ) -> Self {
        let claims = JwtClaims::decode(access_token).unwrap_or_default();
        let field = |key: &str| {
            user.and_then(|u| u.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Self {
            role,
            user_id: claims.user_id().or_else(|| field("id")),
            name: claims
                .display_name()
                .or_else(|| field("UserName"))
                .or_else(|| field("FirstName")),
            email: claims
                .email
                .clone()
                .or_else(|| field("Email"))
                .or_else(|| Some(login_email.to_string())),
        }
    }

    /// Load session from file
    pub fn load(paths: &ConfigPaths) -> CliResult<Option<Self>> {
        if !paths.session_file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&paths.session_file)?;
        let session: Session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    /// Save session to file
    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.session_file, content)?;
        Ok(())
    }

    /// Delete session file
    pub fn delete(paths: &ConfigPaths) -> CliResult<()> {
        if paths.session_file.exists() {
            std::fs::remove_file(&paths.session_file)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::encode_test_jwt;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_session() -> Session {
        Session {
            role: Role::Grantee,
            user_id: Some("7".to_string()),
            name: Some("clerk1".to_string()),
            email: Some("clerk@gov.example".to_string()),
        }
    }

    #[test]
    fn test_session_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());

        let session = create_test_session();
        session.save(&paths).unwrap();

        let loaded = Session::load(&paths).unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_session_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());
        assert!(Session::load(&paths).unwrap().is_none());
    }

    #[test]
    fn test_session_delete() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path());

        create_test_session().save(&paths).unwrap();
        assert!(paths.session_file.exists());

        Session::delete(&paths).unwrap();
        assert!(!paths.session_file.exists());
    }

    #[test]
    fn test_from_login_prefers_claims() {
        let token = encode_test_jwt(&json!({"user_id": 3, "name": "Jane", "email": "j@gov.example"}));
        let user = json!({"UserName": "jdoe", "Email": "other@gov.example"});
        let session = Session::from_login(Role::Citizen, &token, Some(&user), "login@gov.example");
        assert_eq!(session.user_id.as_deref(), Some("3"));
        assert_eq!(session.name.as_deref(), Some("Jane"));
        assert_eq!(session.email.as_deref(), Some("j@gov.example"));
    }

    #[test]
    fn test_from_login_falls_back_to_user_record() {
        let user = json!({"id": "abc", "UserName": "jdoe"});
        let session = Session::from_login(Role::Admin, "opaque", Some(&user), "login@gov.example");
        assert_eq!(session.user_id.as_deref(), Some("abc"));
        assert_eq!(session.name.as_deref(), Some("jdoe"));
        assert_eq!(session.email.as_deref(), Some("login@gov.example"));
    }
}
