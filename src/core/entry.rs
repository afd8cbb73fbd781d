//! File entry parsing.
//!
//! A file entry is written as `[key=]path`. Without a key, the basename of
//! the path becomes the key under which the decrypted content is exposed.

use std::fmt;
use std::str::FromStr;

use crate::error::EntryError;

/// A validated file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    /// Name the decrypted content is exposed under.
    pub key: String,
    /// Location of the encrypted source.
    pub path: String,
}

impl EntrySpec {
    /// Parse a `[key=]path` token.
    ///
    /// The token is split on every `=`. One part means no key was given,
    /// two parts are key and path, anything more is ambiguous since `=`
    /// cannot be escaped.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::MissingKey` or `EntryError::MissingPath` when
    /// either side of the `=` is empty, and `EntryError::Ambiguous` when
    /// the token has more than one `=`.
    pub fn parse(source: &str) -> Result<Self, EntryError> {
        let parts: Vec<&str> = source.split('=').collect();

        match parts.as_slice() {
            [path] => {
                if path.is_empty() {
                    return Err(EntryError::MissingPath {
                        key: String::new(),
                    });
                }
                Ok(Self {
                    key: basename(path).to_string(),
                    path: path.to_string(),
                })
            }
            [key, path] => {
                if key.is_empty() {
                    return Err(EntryError::MissingKey {
                        path: path.to_string(),
                    });
                }
                if path.is_empty() {
                    return Err(EntryError::MissingPath {
                        key: key.to_string(),
                    });
                }
                Ok(Self {
                    key: key.to_string(),
                    path: path.to_string(),
                })
            }
            _ => Err(EntryError::Ambiguous(source.to_string())),
        }
    }
}

impl FromStr for EntrySpec {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.path)
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes.
///
/// A path made only of slashes yields `/`.
pub(crate) fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(i) => &trimmed[i + 1..],
        None => trimmed,
    }
}
