//! sopsgen - Kubernetes Secrets from encrypted files, as a kustomize generator.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── generate      # Run the generator (exec plugin entry point)
//! │   ├── plugin        # kind / subdir / plugin-home helpers
//! │   └── output        # Terminal error output
//! └── core/             # Core library components
//!     ├── constants     # Plugin identity, env vars, annotations
//!     ├── types         # Blob and key/value aliases
//!     ├── validation    # Kubernetes name rules
//!     ├── config        # SOPSGenerator manifest
//!     ├── entry         # [key=]path file entries
//!     ├── format        # Format inference from paths
//!     ├── cipher/       # Decryption backends
//!     │   ├── mod       # Cipher trait
//!     │   ├── age       # In-process age decryption
//!     │   └── sops      # sops CLI
//!     ├── decrypt       # Format-aware decryption
//!     ├── dotenv        # Dotenv parsing
//!     ├── loader        # Source loading with path restrictions
//!     ├── staging       # In-memory staging filesystem
//!     ├── secret        # Secret assembly
//!     └── generator     # Decrypt orchestration
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sopsgen::core::cipher::Age;
//! use sopsgen::core::config::GeneratorConfig;
//! use sopsgen::core::generator::Generator;
//! use sopsgen::core::loader::{FsLoader, LoadRestrictions};
//! use sopsgen::core::validation::KubeValidator;
//!
//! # fn main() -> sopsgen::error::Result<()> {
//! let config = GeneratorConfig::load("generator.yaml".as_ref())?;
//! let loader = FsLoader::new(".", LoadRestrictions::RootOnly);
//! let cipher = Age::from_env()?;
//!
//! let secret = Generator::new(&loader, &cipher, &KubeValidator)
//!     .with_strategy(config.strategy)
//!     .generate(&config.request())?;
//! print!("{}", secret.to_yaml()?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
