//! Format-aware decryption of a single source.

use tracing::debug;

use crate::core::cipher::Cipher;
use crate::core::format::Format;
use crate::core::types::ClearBlob;
use crate::error::{Error, Result};

/// Picks the format for a source and hands it to the cipher.
pub struct Decryptor<'a> {
    cipher: &'a dyn Cipher,
}

impl<'a> Decryptor<'a> {
    pub fn new(cipher: &'a dyn Cipher) -> Self {
        Self { cipher }
    }

    /// Decrypt `raw`, read from `path`.
    ///
    /// `forced` overrides the format inferred from the path; env sources
    /// always pass `Format::Dotenv`. The cleartext is returned as-is and
    /// never reparsed here.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decrypt` naming `path` if the backend fails.
    pub fn decrypt(&self, path: &str, raw: &[u8], forced: Option<Format>) -> Result<ClearBlob> {
        let format = forced.unwrap_or_else(|| Format::for_path(path));
        debug!(path, %format, cipher = self.cipher.name(), "decrypting source");

        self.cipher
            .decrypt(raw, format)
            .map_err(|source| Error::Decrypt {
                path: path.to_string(),
                cipher: self.cipher.name(),
                source,
            })
    }
}
