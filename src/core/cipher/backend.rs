//! Cipher backend selection and dispatch.

use tracing::debug;

use super::{Age, Cipher, Sops};
use crate::core::format::Format;
use crate::core::types::ClearBlob;
use crate::error::CipherError;

/// Cipher backend chosen for a generation run.
///
/// - `Age`: in-process age decryption (default)
/// - `Sops`: the sops CLI
pub enum CipherBackend {
    Age(Age),
    Sops(Sops),
}

impl CipherBackend {
    /// Create a backend by name, loading its key material from the
    /// environment. `None` selects age.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::UnknownBackend` for an unsupported name, or
    /// the backend's own error if it cannot be set up.
    pub fn from_name(name: Option<&str>) -> Result<Self, CipherError> {
        match name.unwrap_or("age") {
            "age" => {
                debug!("creating age cipher backend");
                Ok(Self::Age(Age::from_env()?))
            }
            "sops" => {
                debug!("creating sops cipher backend");
                Ok(Self::Sops(Sops::locate()?))
            }
            other => Err(CipherError::UnknownBackend(other.to_string())),
        }
    }
}

impl Cipher for CipherBackend {
    fn decrypt(&self, ciphertext: &[u8], format: Format) -> Result<ClearBlob, CipherError> {
        match self {
            Self::Age(age) => age.decrypt(ciphertext, format),
            Self::Sops(sops) => sops.decrypt(ciphertext, format),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Age(age) => age.name(),
            Self::Sops(sops) => sops.name(),
        }
    }
}
