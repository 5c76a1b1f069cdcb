//! Generator configuration
//!
//! Loaded from a `providerkit.toml` file that sits alongside the declaration
//! manifest (or is passed explicitly). Every field has a default, so a missing
//! file or a partial file is fine.
//!
//! ```toml
//! [types]
//! content_values = "android.content.ContentValues"
//! uri = "android.net.Uri"
//!
//! [output]
//! router_suffix = "Router"
//! wildcard = "*"
//! uri_scheme = "content"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::manifest::Operation;
use crate::template::{DEFAULT_URI_SCHEME, DEFAULT_WILDCARD};

/// File name looked up next to the manifest.
pub const CONFIG_FILE_NAME: &str = "providerkit.toml";

/// Fully qualified names of the framework types role annotations require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeNames {
    pub string: String,
    pub string_array: String,
    pub content_values: String,
    pub uri: String,
    pub context: String,
    pub cursor: String,
    pub int: String,
}

impl Default for TypeNames {
    fn default() -> Self {
        Self {
            string: "java.lang.String".to_string(),
            string_array: "java.lang.String[]".to_string(),
            content_values: "android.content.ContentValues".to_string(),
            uri: "android.net.Uri".to_string(),
            context: "android.content.Context".to_string(),
            cursor: "android.database.Cursor".to_string(),
            int: "int".to_string(),
        }
    }
}

impl TypeNames {
    /// Conventional return type of a handler for `operation`.
    #[must_use]
    pub fn return_type_for(&self, operation: Operation) -> &str {
        match operation {
            Operation::Query => &self.cursor,
            Operation::Insert => &self.uri,
            Operation::Update | Operation::Delete => &self.int,
            Operation::GetType => &self.string,
        }
    }
}

/// Output naming and template normalization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Appended to the provider's simple name to form the router class name
    pub router_suffix: String,
    /// Marker substituted for placeholder path segments
    pub wildcard: String,
    /// Scheme used when validating `scheme://authority/path`
    pub uri_scheme: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            router_suffix: "Router".to_string(),
            wildcard: DEFAULT_WILDCARD.to_string(),
            uri_scheme: DEFAULT_URI_SCHEME.to_string(),
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub types: TypeNames,
    pub output: OutputConfig,
}

/// Load a configuration file.
///
/// Returns `Ok(None)` if the file does not exist and an error if it exists but
/// does not parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;

    debug!(config = %config_path.display(), "Generator config loaded");
    Ok(Some(config))
}

/// Look for `providerkit.toml` in the manifest's directory.
#[must_use]
pub fn auto_detect_config_path(manifest_path: &Path) -> Option<PathBuf> {
    let config_path = manifest_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path.
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the manifest
/// 3. None (defaults)
#[must_use]
pub fn resolve_config_path(explicit_path: Option<&Path>, manifest_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_config_path(manifest_path)
}

impl GeneratorConfig {
    /// Resolve and load the configuration, falling back to defaults.
    ///
    /// An explicitly requested file that does not exist is an error.
    pub fn resolve(explicit_path: Option<&Path>, manifest_path: &Path) -> anyhow::Result<Self> {
        let Some(path) = resolve_config_path(explicit_path, manifest_path) else {
            return Ok(Self::default());
        };
        match load_config(&path)? {
            Some(config) => Ok(config),
            None if explicit_path.is_some() => {
                anyhow::bail!("Generator config not found: {}", path.display())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output.wildcard, "*");
        assert_eq!(config.output.router_suffix, "Router");
        assert_eq!(config.types.uri, "android.net.Uri");
        assert_eq!(config.types.return_type_for(Operation::Delete), "int");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: GeneratorConfig =
            toml::from_str("[output]\nrouter_suffix = \"Dispatcher\"\n").unwrap();
        assert_eq!(config.output.router_suffix, "Dispatcher");
        assert_eq!(config.output.uri_scheme, "content");
        assert_eq!(config.types, TypeNames::default());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_auto_detect_next_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("decls.yaml");
        assert!(auto_detect_config_path(&manifest).is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[types]\nint = \"long\"\n").unwrap();
        let config = GeneratorConfig::resolve(None, &manifest).unwrap();
        assert_eq!(config.types.int, "long");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("decls.yaml");
        let missing = dir.path().join("nope.toml");
        assert!(GeneratorConfig::resolve(Some(&missing), &manifest).is_err());
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
