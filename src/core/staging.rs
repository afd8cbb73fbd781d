//! In-memory staging filesystem.
//!
//! Holds decrypted content keyed by the path it was read from, for the
//! duration of one generation run. Nothing touches disk.

use std::collections::BTreeMap;

use tracing::trace;

use crate::core::loader::Loader;
use crate::core::types::{ClearBlob, RawBlob};
use crate::error::LoadError;

/// Ephemeral path to content store.
#[derive(Debug, Default)]
pub struct StagingFs {
    files: BTreeMap<String, ClearBlob>,
}

impl StagingFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `path`, replacing anything already there.
    pub fn write_file(&mut self, path: impl Into<String>, content: ClearBlob) {
        let path = path.into();
        trace!(path = %path, len = content.len(), "staging file");
        self.files.insert(path, content);
    }

    /// Content staged under `path`.
    pub fn read_file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|c| c.as_slice())
    }

    /// Staged paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Loader for StagingFs {
    fn load(&self, path: &str) -> Result<RawBlob, LoadError> {
        self.read_file(path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| LoadError::NotStaged(path.to_string()))
    }
}
