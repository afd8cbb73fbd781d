//! Decrypt orchestration.
//!
//! A [`Generator`] resolves every declared entry of a [`GenerationRequest`]
//! in order (file entries first, then env entries), decrypts it and stages
//! the result for the Secret builder. The first failing entry aborts the
//! run and nothing is returned for the entries before it.
//!
//! # Strategies
//!
//! - [`Strategy::Literal`]: file entries become `key = cleartext` pairs and
//!   env entries are dotenv-parsed into one shared mapping where a later
//!   source overwrites an earlier one. The builder gets literal pairs.
//! - [`Strategy::Staged`]: every decrypted entry is written to a
//!   [`StagingFs`] under its original path and the builder reads them back
//!   through its loader. The builder does its own dotenv handling, where a
//!   name defined by two env sources is an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, Dispatch};

use crate::core::cipher::Cipher;
use crate::core::decrypt::Decryptor;
use crate::core::dotenv;
use crate::core::entry::EntrySpec;
use crate::core::format::Format;
use crate::core::loader::Loader;
use crate::core::secret::{Secret, SecretArgs, SecretFactory};
use crate::core::staging::StagingFs;
use crate::core::types::{ClearBlob, EnvMap, KvPair};
use crate::core::validation::Validator;
use crate::error::{Error, Result};

/// How decrypted content reaches the Secret builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Literal,
    Staged,
}

/// Input of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub args: SecretArgs,
    /// `[key=]path` tokens, in declared order
    pub files: Vec<String>,
    /// Dotenv source paths, in declared order
    pub envs: Vec<String>,
}

/// Decrypted content ready for the Secret builder.
#[derive(Debug)]
pub enum Resolved {
    Literals(Vec<KvPair>),
    Staged {
        fs: StagingFs,
        files: Vec<EntrySpec>,
        envs: Vec<String>,
    },
}

/// Drives entry parsing, loading, decryption and staging for one request.
pub struct Generator<'a> {
    loader: &'a dyn Loader,
    cipher: &'a dyn Cipher,
    validator: &'a dyn Validator,
    strategy: Strategy,
    dispatch: Option<Dispatch>,
}

impl<'a> Generator<'a> {
    pub fn new(loader: &'a dyn Loader, cipher: &'a dyn Cipher, validator: &'a dyn Validator) -> Self {
        Self {
            loader,
            cipher,
            validator,
            strategy: Strategy::default(),
            dispatch: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Send this generator's logs to `dispatch` instead of the default
    /// subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Resolve and build the Secret for `request`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first entry that fails to parse, load,
    /// decrypt or validate, or the builder's error.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Secret> {
        self.in_scope(|| {
            info!(
                name = %request.args.metadata.name,
                files = request.files.len(),
                envs = request.envs.len(),
                strategy = ?self.strategy,
                "generating secret"
            );

            let factory = SecretFactory::new(self.validator);
            match self.resolve_inner(request)? {
                Resolved::Literals(pairs) => factory.from_literals(&request.args, pairs),
                Resolved::Staged { fs, files, envs } => {
                    factory.from_loader(&request.args, &fs, &files, &envs)
                }
            }
        })
    }

    /// Decrypt every entry of `request` without building the Secret.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`], minus the builder's errors.
    pub fn resolve(&self, request: &GenerationRequest) -> Result<Resolved> {
        self.in_scope(|| self.resolve_inner(request))
    }

    fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn resolve_inner(&self, request: &GenerationRequest) -> Result<Resolved> {
        match self.strategy {
            Strategy::Literal => self.resolve_literals(request).map(Resolved::Literals),
            Strategy::Staged => self.resolve_staged(request),
        }
    }

    fn resolve_literals(&self, request: &GenerationRequest) -> Result<Vec<KvPair>> {
        let decryptor = Decryptor::new(self.cipher);
        let mut pairs = Vec::with_capacity(request.files.len());

        for token in &request.files {
            let entry = EntrySpec::parse(token)?;
            let clear = self.fetch(&decryptor, &entry.path, None)?;
            debug!(key = %entry.key, path = %entry.path, "resolved file entry");
            pairs.push(KvPair::new(entry.key, clear.to_vec()));
        }

        let mut vars = EnvMap::new();
        for path in &request.envs {
            let clear = self.fetch(&decryptor, path, Some(Format::Dotenv))?;
            dotenv::parse_into(&clear, self.validator, &mut vars).map_err(|source| {
                Error::Dotenv {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!(path = %path, vars = vars.len(), "resolved env entry");
        }

        pairs.extend(
            vars.into_iter()
                .map(|(name, value)| KvPair::new(name, value)),
        );
        Ok(pairs)
    }

    fn resolve_staged(&self, request: &GenerationRequest) -> Result<Resolved> {
        let decryptor = Decryptor::new(self.cipher);
        let mut fs = StagingFs::new();
        let mut files = Vec::with_capacity(request.files.len());

        for token in &request.files {
            let entry = EntrySpec::parse(token)?;
            let clear = self.fetch(&decryptor, &entry.path, None)?;
            fs.write_file(entry.path.clone(), clear);
            files.push(entry);
        }

        for path in &request.envs {
            let clear = self.fetch(&decryptor, path, Some(Format::Dotenv))?;
            fs.write_file(path.clone(), clear);
        }

        debug!(staged = fs.len(), "staged decrypted sources");
        Ok(Resolved::Staged {
            fs,
            files,
            envs: request.envs.clone(),
        })
    }

    fn fetch(
        &self,
        decryptor: &Decryptor<'_>,
        path: &str,
        forced: Option<Format>,
    ) -> Result<ClearBlob> {
        let raw = self.loader.load(path)?;
        decryptor.decrypt(path, &raw, forced)
    }
}
