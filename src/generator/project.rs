use std::path::{Path, PathBuf};

use tracing::info;

use super::templates::{write_model_json, write_router_sources};
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, Severity};
use crate::manifest::load_manifest;
use crate::processor::{process_manifest, RouterModel};

/// Inputs of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub manifest: PathBuf,
    pub output: PathBuf,
    /// Explicit config file; otherwise `providerkit.toml` next to the manifest
    pub config: Option<PathBuf>,
    /// Also dump the aggregate model as JSON here
    pub model_json: Option<PathBuf>,
    pub force: bool,
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(manifest: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            output: output.into(),
            config: None,
            model_json: None,
            force: false,
            dry_run: false,
        }
    }
}

/// Outcome of a generation run.
#[derive(Debug)]
pub struct GenerationReport {
    /// Router sources written (or that would be written in a dry run)
    pub written: Vec<PathBuf>,
    /// Every diagnostic recorded during processing, in order
    pub diagnostics: Vec<Diagnostic>,
    pub model: RouterModel,
}

impl GenerationReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Load the manifest and config, run one processing round and write a router
/// for every provider that has at least one valid handler.
///
/// Validation problems end up in [`GenerationReport::diagnostics`]; only
/// loading and writing failures are returned as errors.
///
/// # Errors
///
/// Returns an error if the manifest or config cannot be loaded, or if output
/// cannot be written
pub fn generate_routers(options: &GenerateOptions) -> anyhow::Result<GenerationReport> {
    let manifest = load_manifest(&options.manifest)?;
    let config = GeneratorConfig::resolve(options.config.as_deref(), &options.manifest)?;

    let mut round = process_manifest(&manifest, &config);
    let written = write_router_sources(
        &round.model,
        &config.types,
        &options.output,
        options.force,
        options.dry_run,
    )?;
    if let Some(path) = options.model_json.as_deref().filter(|_| !options.dry_run) {
        write_model_json(&round.model, path)?;
    }

    let mut diagnostics = Vec::new();
    round.reporter.drain(&mut diagnostics);
    info!(
        manifest = %options.manifest.display(),
        output = %options.output.display(),
        routers = written.len(),
        "Generation finished"
    );
    Ok(GenerationReport {
        written,
        diagnostics,
        model: round.model,
    })
}

/// Load and process a manifest without writing anything.
///
/// # Errors
///
/// Returns an error if the manifest or config cannot be loaded
pub fn check_manifest(
    manifest_path: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<(RouterModel, Vec<Diagnostic>)> {
    let manifest = load_manifest(manifest_path)?;
    let config = GeneratorConfig::resolve(config_path, manifest_path)?;
    let mut round = process_manifest(&manifest, &config);
    let mut diagnostics = Vec::new();
    round.reporter.drain(&mut diagnostics);
    Ok((round.model, diagnostics))
}
