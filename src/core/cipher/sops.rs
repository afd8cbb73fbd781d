//! sops CLI backend.
//!
//! Decrypts files produced by `sops`, where values are encrypted inside a
//! structured document. The format tells sops how to read the document.
//!
//! ## Requirements
//!
//! - `sops` CLI must be installed and on `PATH`
//! - Key material must be reachable by sops (age keys, KMS credentials,
//!   PGP keyring)

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::format::Format;
use crate::core::types::ClearBlob;
use crate::error::CipherError;

/// sops cipher backend using the sops CLI.
#[derive(Debug)]
pub struct Sops {
    program: PathBuf,
}

impl Sops {
    /// Locate `sops` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::BackendUnavailable` if it cannot be found.
    pub fn locate() -> Result<Self, CipherError> {
        let program = which::which("sops").map_err(|_| {
            CipherError::BackendUnavailable(
                "sops CLI not found. Install it from https://github.com/getsops/sops".to_string(),
            )
        })?;
        debug!(program = %program.display(), "found sops");
        Ok(Self { program })
    }

    /// Use a specific sops executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, format: Format) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args([
            "--decrypt",
            "--input-type",
            format.as_str(),
            "--output-type",
            format.as_str(),
            "/dev/stdin",
        ]);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Cipher for Sops {
    fn name(&self) -> &'static str {
        "sops"
    }

    fn decrypt(&self, ciphertext: &[u8], format: Format) -> Result<ClearBlob, CipherError> {
        trace!(ciphertext_len = ciphertext.len(), %format, "decrypting with sops");

        let mut child = self
            .command(format)
            .spawn()
            .map_err(|e| CipherError::DecryptionFailed(format!("failed to spawn sops: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(ciphertext).map_err(|e| {
                CipherError::DecryptionFailed(format!("failed to write ciphertext: {}", e))
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CipherError::DecryptionFailed(format!("sops command failed: {}", e)))?;

        let plaintext = Zeroizing::new(output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CipherError::DecryptionFailed(format!(
                "sops decrypt failed: {}",
                stderr.trim()
            )));
        }

        trace!(plaintext_len = plaintext.len(), "decrypted with sops");
        Ok(plaintext)
    }
}
