//! Encrypted file credential storage backend

use crate::credentials::store::CredentialStore;
use crate::error::{CliError, CliResult};
use crate::models::Credentials;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

const NONCE_LEN: usize = 12;
const KEY_CONTEXT: &str = "govgate-credentials-v1";

/// AES-256-GCM encrypted token file.
///
/// The key is derived from the host, the OS user and the file location, so
/// a copied file does not decrypt elsewhere. Used only when the OS keyring
/// is unavailable.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn derive_key(&self) -> [u8; 32] {
        let host = std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .unwrap_or_default();
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        let home = dirs::home_dir()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Four independently seeded 64-bit digests make up the 256-bit key
        let mut key = [0u8; 32];
        for (index, chunk) in key.chunks_exact_mut(8).enumerate() {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            KEY_CONTEXT.hash(&mut hasher);
            index.hash(&mut hasher);
            host.hash(&mut hasher);
            user.hash(&mut hasher);
            home.hash(&mut hasher);
            self.path.hash(&mut hasher);
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        key
    }

    fn cipher(&self) -> CliResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.derive_key())
            .map_err(|e| CliError::CredentialStorage(format!("Cipher init failed: {e}")))
    }

    /// nonce || ciphertext
    fn seal(&self, plaintext: &[u8]) -> CliResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .cipher()?
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| CliError::CredentialStorage(format!("Encryption failed: {e}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend(ciphertext);
        Ok(sealed)
    }

    fn open(&self, sealed: &[u8]) -> CliResult<Vec<u8>> {
        if sealed.len() <= NONCE_LEN {
            return Err(CliError::CredentialStorage(
                "Credential file is truncated".to_string(),
            ));
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        self.cipher()?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| CliError::CredentialStorage(format!("Decryption failed: {e}")))
    }
}

impl CredentialStore for FileCredentialStore {
    fn store(&self, credentials: &Credentials) -> CliResult<()> {
        let json = serde_json::to_vec(credentials)?;
        let encoded = BASE64.encode(self.seal(&json)?);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, encoded)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn load(&self) -> CliResult<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let encoded = std::fs::read_to_string(&self.path)?;
        let sealed = BASE64
            .decode(encoded.trim())
            .map_err(|e| CliError::CredentialStorage(format!("Invalid credential file: {e}")))?;
        let json = self.open(&sealed)?;
        let credentials = serde_json::from_slice(&json)
            .map_err(|e| CliError::CredentialStorage(format!("Invalid credential data: {e}")))?;

        Ok(Some(credentials))
    }

    fn delete(&self) -> CliResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn sample_credentials() -> Credentials {
        Credentials {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn test_store_load_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp_dir.path().join("credentials.enc"));

        store.store(&sample_credentials()).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.refresh_token, "refresh");

        store.delete().unwrap();
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_is_not_plaintext() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.enc");
        let store = FileCredentialStore::new(path.clone());
        store.store(&sample_credentials()).unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(!raw.contains("refresh"));
    }

    #[test]
    fn test_key_bound_to_path() {
        let a = FileCredentialStore::new(PathBuf::from("/tmp/a/credentials.enc"));
        let b = FileCredentialStore::new(PathBuf::from("/tmp/b/credentials.enc"));
        assert_eq!(a.derive_key(), a.derive_key());
        assert_ne!(a.derive_key(), b.derive_key());
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.enc");
        std::fs::write(&path, BASE64.encode([0u8; 4])).unwrap();
        let store = FileCredentialStore::new(path);
        assert!(matches!(
            store.load(),
            Err(CliError::CredentialStorage(_))
        ));
    }
}
