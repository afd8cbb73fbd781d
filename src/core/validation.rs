//! Name validation.
//!
//! Environment variable names and Secret data keys follow the Kubernetes
//! syntax rules. The checks sit behind [`Validator`] so a host can supply
//! its own rules.

use crate::error::ValidationError;

/// Maximum length of a Secret data key.
const MAX_DATA_KEY_LEN: usize = 253;

/// Name syntax checks used by the dotenv parser and the Secret builder.
pub trait Validator {
    /// Check a dotenv variable name.
    fn validate_env_name(&self, name: &str) -> Result<(), ValidationError>;

    /// Check a key of the Secret's data map.
    fn validate_data_key(&self, key: &str) -> Result<(), ValidationError>;
}

/// Kubernetes naming rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct KubeValidator;

impl Validator for KubeValidator {
    /// Names must match `[-._a-zA-Z][-._a-zA-Z0-9]*`.
    fn validate_env_name(&self, name: &str) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidEnvName {
            name: name.to_string(),
            reason,
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("cannot be empty".to_string()));
        };

        if first.is_ascii_digit() {
            return Err(invalid("cannot start with a digit".to_string()));
        }

        for (i, ch) in name.chars().enumerate() {
            if !is_key_char(ch) {
                return Err(invalid(format!(
                    "invalid character '{}' at position {}. Only letters, digits, '-', '.' and '_' are allowed",
                    ch,
                    i + 1
                )));
            }
        }

        Ok(())
    }

    /// Keys must match `[-._a-zA-Z0-9]+`, be at most 253 characters and
    /// must not be `.`, `..` or start with `..`.
    fn validate_data_key(&self, key: &str) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidDataKey {
            key: key.to_string(),
            reason,
        };

        if key.is_empty() {
            return Err(invalid("cannot be empty".to_string()));
        }
        if key.len() > MAX_DATA_KEY_LEN {
            return Err(invalid(format!(
                "must be no more than {} characters",
                MAX_DATA_KEY_LEN
            )));
        }
        if let Some(ch) = key.chars().find(|c| !is_key_char(*c)) {
            return Err(invalid(format!(
                "invalid character '{}'. Only letters, digits, '-', '.' and '_' are allowed",
                ch
            )));
        }
        if key == "." || key == ".." {
            return Err(invalid(format!("must not be '{}'", key)));
        }
        if key.starts_with("..") {
            return Err(invalid("must not start with '..'".to_string()));
        }

        Ok(())
    }
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_')
}
