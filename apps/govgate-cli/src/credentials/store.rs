//! Credential storage abstraction

use crate::config::ConfigPaths;
use crate::credentials::{FileCredentialStore, KeyringCredentialStore};
use crate::error::CliResult;
use crate::models::Credentials;

/// Where the bearer tokens live between invocations
pub trait CredentialStore: Send + Sync {
    fn store(&self, credentials: &Credentials) -> CliResult<()>;

    fn load(&self) -> CliResult<Option<Credentials>>;

    /// Remove stored tokens; a missing entry is not an error.
    fn delete(&self) -> CliResult<()>;

    fn exists(&self) -> bool;
}

/// OS keyring when it answers, the encrypted file otherwise.
pub fn get_credential_store(paths: &ConfigPaths) -> Box<dyn CredentialStore> {
    match KeyringCredentialStore::new() {
        Ok(store) if store.is_available() => Box::new(store),
        _ => {
            tracing::warn!(
                path = %paths.credentials_file.display(),
                "System keyring unavailable, using encrypted file storage"
            );
            Box::new(FileCredentialStore::new(paths.credentials_file.clone()))
        }
    }
}
