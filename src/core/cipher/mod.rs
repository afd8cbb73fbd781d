//! Decryption backends.
//!
//! The generator never implements cryptography itself. It hands the raw
//! bytes and their [`Format`] to a [`Cipher`] and gets cleartext back.
//!
//! ## Backends
//!
//! - **age**: Default. Decrypts whole-file age payloads in-process.
//! - **sops**: Runs the `sops` CLI, which understands structured
//!   per-value encryption and therefore needs the format.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Add a variant to `CipherBackend`

use crate::core::format::Format;
use crate::core::types::ClearBlob;
use crate::error::CipherError;

mod age;
mod backend;
mod sops;

pub use age::Age;
pub use backend::CipherBackend;
pub use sops::Sops;

/// Decryption backend.
pub trait Cipher {
    /// Decrypt `ciphertext` encoded as `format`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` on a bad key, corrupted ciphertext or an
    /// unsupported format. Callers never retry.
    fn decrypt(&self, ciphertext: &[u8], format: Format) -> Result<ClearBlob, CipherError>;

    /// Backend name for display/config.
    fn name(&self) -> &'static str;
}
