use anyhow::Context;
use std::path::Path;
use tracing::info;

use super::types::Manifest;

impl Manifest {
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML declaration manifest")
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON declaration manifest")
    }
}

/// Load a declaration manifest from disk.
///
/// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);

    let manifest = if is_yaml {
        Manifest::from_yaml_str(&content)
    } else {
        Manifest::from_json_str(&content)
    }
    .with_context(|| format!("Invalid manifest: {}", path.display()))?;

    info!(
        manifest = %path.display(),
        providers = manifest.providers.len(),
        methods = manifest.providers.iter().map(|p| p.methods.len()).sum::<usize>(),
        "Declaration manifest loaded"
    );
    Ok(manifest)
}
