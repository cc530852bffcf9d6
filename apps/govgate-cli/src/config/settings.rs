//! Persisted CLI settings

use super::ConfigPaths;
use crate::error::CliResult;
use govgate_core::Role;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "GOVGATE_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How retry delays grow between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backoff {
    #[default]
    Linear,
    Exponential,
}

/// Transport-level retry for failed connections and gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Extra attempts after the first one. 0 disables retry.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff: Backoff,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            backoff: Backoff::Linear,
        }
    }
}

/// CLI configuration stored in `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub retry: RetrySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetrySettings::default(),
        }
    }
}

impl Config {
    /// Load from disk (defaults when absent), then apply `GOVGATE_API_URL`.
    pub fn load(paths: &ConfigPaths) -> CliResult<Self> {
        let mut config = if paths.config_file.exists() {
            let content = std::fs::read_to_string(&paths.config_file)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }

        config.api_url = normalize_url(&config.api_url);
        Ok(config)
    }

    pub fn save(&self, paths: &ConfigPaths) -> CliResult<()> {
        paths.ensure_dir_exists()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&paths.config_file, content)?;
        Ok(())
    }

    /// Absolute URL for a path under the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// `{api_url}/api/{role}/{path}/`, always with a trailing slash.
    pub fn role_url(&self, role: Role, path: &str) -> String {
        format!(
            "{}/api/{}/{}/",
            self.api_url,
            role.segment(),
            path.trim_matches('/')
        )
    }

    pub fn register_url(&self) -> String {
        self.url("/api/auth/register/")
    }

    pub fn refresh_url(&self) -> String {
        self.url("/api/auth/refresh/")
    }

    pub fn login_url(&self, role: Role) -> String {
        self.url(&role.login_path())
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_role_url_has_single_slashes() {
        let config = Config::default();
        assert_eq!(
            config.role_url(Role::Admin, "/department/"),
            "http://localhost:8000/api/admin/department/"
        );
        assert_eq!(
            config.role_url(Role::Citizen, "request/3f2a"),
            "http://localhost:8000/api/citizen/request/3f2a/"
        );
    }

    #[test]
    fn test_login_urls() {
        let config = Config::default();
        assert_eq!(
            config.login_url(Role::Citizen),
            "http://localhost:8000/api/auth/login/"
        );
        assert_eq!(
            config.login_url(Role::Manager),
            "http://localhost:8000/api/manager/login/"
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"api_url": "https://gov.example"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.retry, RetrySettings::default());
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(" https://gov.example/ "), "https://gov.example");
    }
}
