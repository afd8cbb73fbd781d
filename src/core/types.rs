//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;
use zeroize::Zeroizing;

/// Bytes read from a source, still encrypted.
pub type RawBlob = Vec<u8>;

/// Decrypted bytes. Wiped from memory when dropped.
pub type ClearBlob = Zeroizing<Vec<u8>>;

/// Name to value mapping produced from dotenv content.
///
/// Ordered by name so that flattening it is deterministic.
pub type EnvMap = BTreeMap<String, String>;

/// A resolved name/value pair destined for the Secret's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub name: String,
    pub value: Vec<u8>,
}

impl KvPair {
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
