//! OS keyring credential storage backend

use crate::credentials::store::CredentialStore;
use crate::error::{CliError, CliResult};
use crate::models::Credentials;
use keyring::Entry;

const SERVICE_NAME: &str = "govgate";
const ACCOUNT: &str = "bearer-tokens";

/// Tokens kept in the platform secret store (Keychain, Secret Service,
/// Credential Manager).
pub struct KeyringCredentialStore {
    entry: Entry,
}

impl KeyringCredentialStore {
    pub fn new() -> CliResult<Self> {
        let entry = Entry::new(SERVICE_NAME, ACCOUNT)?;
        Ok(Self { entry })
    }

    /// A missing entry still means the keyring answered.
    pub fn is_available(&self) -> bool {
        matches!(
            self.entry.get_password(),
            Ok(_) | Err(keyring::Error::NoEntry)
        )
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn store(&self, credentials: &Credentials) -> CliResult<()> {
        let json = serde_json::to_string(credentials)?;
        self.entry
            .set_password(&json)
            .map_err(|e| CliError::CredentialStorage(format!("Failed to store tokens: {e}")))
    }

    fn load(&self) -> CliResult<Option<Credentials>> {
        match self.entry.get_password() {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CliError::CredentialStorage(format!(
                "Failed to load tokens: {e}"
            ))),
        }
    }

    fn delete(&self) -> CliResult<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CliError::CredentialStorage(format!(
                "Failed to delete tokens: {e}"
            ))),
        }
    }

    fn exists(&self) -> bool {
        self.entry.get_password().is_ok()
    }
}
