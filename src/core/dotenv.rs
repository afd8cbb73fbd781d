//! Dotenv parsing for decrypted env sources.
//!
//! Supports the ruby/node/docker style: one `NAME=value` per line, blank
//! lines and `#` comments ignored, empty values allowed. Values are taken
//! verbatim after the first `=`; there is no quoting or interpolation.
//!
//! Name-only lines are rejected. Reading a value from the ambient process
//! environment is not supported.

use tracing::trace;

use crate::core::constants::UTF8_BOM;
use crate::core::types::EnvMap;
use crate::core::validation::Validator;
use crate::error::{DotenvError, LineError};

/// Parse dotenv content into a fresh mapping.
///
/// # Errors
///
/// Returns `DotenvError` carrying the 0-based number of the first line that
/// failed. Nothing is returned for the lines before it.
pub fn parse(content: &[u8], validator: &dyn Validator) -> Result<EnvMap, DotenvError> {
    let mut vars = EnvMap::new();
    for (line, bytes) in lines(content).enumerate() {
        let bytes = if line == 0 {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };

        parse_line(bytes, validator, &mut vars).map_err(|kind| DotenvError { line, kind })?;
    }

    trace!(vars = vars.len(), "parsed dotenv content");
    Ok(vars)
}

/// Parse dotenv content and merge it into `vars`.
///
/// Later names overwrite earlier ones. `vars` is left untouched if any
/// line fails.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_into(
    content: &[u8],
    validator: &dyn Validator,
    vars: &mut EnvMap,
) -> Result<(), DotenvError> {
    vars.extend(parse(content, validator)?);
    Ok(())
}

fn parse_line(bytes: &[u8], validator: &dyn Validator, vars: &mut EnvMap) -> Result<(), LineError> {
    let line = std::str::from_utf8(bytes)
        .map_err(|_| LineError::InvalidEncoding(String::from_utf8_lossy(bytes).into_owned()))?;

    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let (name, value) = line
        .split_once('=')
        .ok_or_else(|| LineError::MissingSeparator(line.to_string()))?;

    validator.validate_env_name(name)?;
    vars.insert(name.to_string(), value.to_string());

    Ok(())
}

/// Split on `\n`, dropping a trailing `\r` from each line. A final empty
/// segment after the last newline is not a line.
fn lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let empty = content.is_empty();

    body.split(|b| *b == b'\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}
