//! Age decryption backend.
//!
//! Decrypts armored or binary age payloads with x25519 identities loaded
//! the same way sops looks for them.

use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use ::age::{x25519, IdentityFile};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::constants::{AGE_KEY_ENV, AGE_KEY_FILE_DEFAULT, AGE_KEY_FILE_ENV};
use crate::core::format::Format;
use crate::core::types::ClearBlob;
use crate::error::CipherError;

type BoxedIdentity = Box<dyn ::age::Identity>;

/// Age-based decryption using one or more identities.
pub struct Age {
    identities: Vec<BoxedIdentity>,
}

impl Age {
    /// Create a backend from a single x25519 identity.
    pub fn new(identity: x25519::Identity) -> Self {
        Self {
            identities: vec![Box::new(identity)],
        }
    }

    /// Parse identities from the contents of an age keys file.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidIdentity` if the contents cannot be
    /// parsed, or `CipherError::NoIdentity` if they hold no identity.
    pub fn from_keys(contents: &str) -> Result<Self, CipherError> {
        let identities = IdentityFile::from_buffer(BufReader::new(contents.as_bytes()))
            .map_err(|e| CipherError::InvalidIdentity(e.to_string()))?
            .into_identities()
            .map_err(|e| CipherError::InvalidIdentity(e.to_string()))?;

        if identities.is_empty() {
            return Err(CipherError::NoIdentity);
        }

        Ok(Self { identities })
    }

    /// Load identities from a keys file.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidIdentity` if the file cannot be read
    /// or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CipherError> {
        debug!(path = %path.display(), "loading age identities");
        let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|e| {
            CipherError::InvalidIdentity(format!("{}: {}", path.display(), e))
        })?);
        Self::from_keys(&contents)
    }

    /// Load identities from the environment.
    ///
    /// Checks `SOPS_AGE_KEY`, then `SOPS_AGE_KEY_FILE`, then the default
    /// keys file under the platform config dir.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoIdentity` if none of them is set or present.
    pub fn from_env() -> Result<Self, CipherError> {
        if let Ok(keys) = std::env::var(AGE_KEY_ENV) {
            let keys = Zeroizing::new(keys);
            debug!(source = AGE_KEY_ENV, "loading age identities");
            return Self::from_keys(&keys);
        }

        if let Ok(path) = std::env::var(AGE_KEY_FILE_ENV) {
            return Self::from_file(Path::new(&path));
        }

        match default_keys_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Err(CipherError::NoIdentity),
        }
    }
}

fn default_keys_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(AGE_KEY_FILE_DEFAULT))
}

impl Cipher for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn decrypt(&self, ciphertext: &[u8], format: Format) -> Result<ClearBlob, CipherError> {
        trace!(ciphertext_len = ciphertext.len(), %format, "decrypting");

        let reader = ::age::armor::ArmoredReader::new(ciphertext);
        let decryptor = ::age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        if decryptor.is_scrypt() {
            return Err(CipherError::Passphrase);
        }

        let mut reader = decryptor
            .decrypt(
                self.identities
                    .iter()
                    .map(|i| i.as_ref() as &dyn ::age::Identity),
            )
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        let mut decrypted = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }
}
