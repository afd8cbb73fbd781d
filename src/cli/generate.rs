//! Generate command.
//!
//! Reads the manifest, decrypts its entries relative to the working
//! directory and prints the Secret on stdout.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{GenerateArgs, OutputFormat};
use crate::core::cipher::{Cipher, CipherBackend};
use crate::core::config::GeneratorConfig;
use crate::core::generator::Generator;
use crate::core::loader::FsLoader;
use crate::core::validation::KubeValidator;
use crate::error::Result;

/// Generate the Secret described by the manifest at `config_path`.
pub fn execute(config_path: &Path, args: &GenerateArgs) -> Result<()> {
    let rendered = render(config_path, args)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render(config_path: &Path, args: &GenerateArgs) -> Result<String> {
    let config = GeneratorConfig::load(config_path)?;
    let root = std::env::current_dir()?;
    let loader = FsLoader::new(root, args.load_restrictor);
    let cipher = CipherBackend::from_name(config.cipher.as_deref())?;

    debug!(
        root = %loader.root().display(),
        restrictions = ?args.load_restrictor,
        cipher = cipher.name(),
        "starting generation"
    );

    let secret = Generator::new(&loader, &cipher, &KubeValidator)
        .with_strategy(config.strategy)
        .generate(&config.request())?;

    match args.output {
        OutputFormat::Yaml => secret.to_yaml(),
        OutputFormat::Json => secret.to_json().map(|json| json + "\n"),
    }
}
