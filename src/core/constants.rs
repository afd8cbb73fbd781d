//! Constants used throughout sopsgen.
//!
//! Centralizes plugin identity, environment variable names and the
//! annotations understood by kustomize.

/// Plugin domain, the group part of the generator's `apiVersion`.
pub const DOMAIN: &str = "sopsgen.io";

/// Group of manifests written for the Go SOPSGenerator plugin, still
/// accepted so existing kustomizations keep working.
pub const LEGACY_DOMAIN: &str = "omninonsense.github.io";

/// Plugin version, the version part of the generator's `apiVersion`.
pub const VERSION: &str = "v1beta";

/// Kind of the generator resource in a kustomization.
pub const KIND: &str = "SOPSGenerator";

/// Inline age identities (the contents of a keys file).
pub const AGE_KEY_ENV: &str = "SOPS_AGE_KEY";

/// Path to an age identities file.
pub const AGE_KEY_FILE_ENV: &str = "SOPS_AGE_KEY_FILE";

/// Default age identities file, relative to the platform config dir.
pub const AGE_KEY_FILE_DEFAULT: &str = "sops/age/keys.txt";

/// Overrides the kustomize plugin home lookup.
pub const PLUGIN_HOME_ENV: &str = "KUSTOMIZE_PLUGIN_HOME";

/// Plugin home relative to the config dir.
pub const PLUGIN_HOME_DIR: &str = "kustomize/plugin";

/// Log filter environment variable.
pub const LOG_ENV: &str = "SOPSGEN_LOG";

/// Set to `json` to emit structured JSON logs.
pub const LOG_FORMAT_ENV: &str = "SOPSGEN_LOG_FORMAT";

/// Asks kustomize to append a content hash to the resource name.
pub const NEEDS_HASH_ANNOTATION: &str = "kustomize.config.k8s.io/needs-hash";

/// Tells kustomize how to combine the resource with an existing one.
pub const BEHAVIOR_ANNOTATION: &str = "kustomize.config.k8s.io/behavior";

/// Secret type used when none is given.
pub const DEFAULT_SECRET_TYPE: &str = "Opaque";

/// UTF-8 byte order mark.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// `apiVersion` the generator manifest must carry.
pub fn api_version() -> String {
    format!("{}/{}", DOMAIN, VERSION)
}

/// Whether a manifest's `apiVersion` targets this generator.
pub fn is_supported_api_version(api_version: &str) -> bool {
    match api_version.split_once('/') {
        Some((group, version)) => (group == DOMAIN || group == LEGACY_DOMAIN) && version == VERSION,
        None => false,
    }
}

/// Plugin directory below the kustomize plugin home.
pub fn subdir() -> String {
    format!("{}/{}/{}", DOMAIN, VERSION, KIND.to_lowercase())
}
