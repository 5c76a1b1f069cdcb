use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::diagnostics::{print_diagnostics, Diagnostic, DiagnosticSink, Severity, TracingSink};
use crate::generator::{check_manifest, generate_routers, GenerateOptions};
use crate::processor::RouterModel;

/// Command-line interface for the router generator
#[derive(Parser)]
#[command(name = "providerkit-gen")]
#[command(about = "Content provider router generator", long_about = None, version)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate one router class per provider in the manifest
    Generate {
        /// Declaration manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output source root; routers land in their package directories
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        /// Generator config (default: providerkit.toml next to the manifest)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the processed model as JSON to this file
        #[arg(long)]
        model_json: Option<PathBuf>,

        /// Overwrite existing router files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Validate the manifest and print every diagnostic
    Check {
        /// Declaration manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Generator config (default: providerkit.toml next to the manifest)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show only errors (hide warnings and notes)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the matcher buckets and delegates the manifest produces
    Inspect {
        /// Declaration manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Generator config (default: providerkit.toml next to the manifest)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the model as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// At least one error diagnostic was recorded
    ErrorsReported,
}

impl Outcome {
    fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.iter().any(|d| d.severity == Severity::Error) {
            Outcome::ErrorsReported
        } else {
            Outcome::Success
        }
    }

    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::ErrorsReported => ExitCode::FAILURE,
        }
    }
}

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if the manifest or config cannot be loaded, or if output
/// cannot be written. Validation problems are reported, not returned.
pub fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    match &cli.command {
        Commands::Generate {
            manifest,
            output,
            config,
            model_json,
            force,
            dry_run,
        } => {
            let options = GenerateOptions {
                manifest: manifest.clone(),
                output: output.clone(),
                config: config.clone(),
                model_json: model_json.clone(),
                force: *force,
                dry_run: *dry_run,
            };
            let report = generate_routers(&options)?;
            let outcome = Outcome::from_diagnostics(&report.diagnostics);
            let errors = report
                .diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .count();
            let mut sink = TracingSink;
            for diagnostic in report.diagnostics {
                sink.emit(diagnostic);
            }
            println!(
                "📦 {} router(s) for {} provider(s), {} error(s)",
                report.written.len(),
                report.model.providers.len(),
                errors
            );
            Ok(outcome)
        }
        Commands::Check {
            manifest,
            config,
            errors_only,
        } => {
            let (_model, mut diagnostics) = check_manifest(manifest, config.as_deref())?;
            let outcome = Outcome::from_diagnostics(&diagnostics);
            if *errors_only {
                diagnostics.retain(|d| d.severity == Severity::Error);
            }
            print_diagnostics(&diagnostics);
            Ok(outcome)
        }
        Commands::Inspect {
            manifest,
            config,
            json,
        } => {
            let (model, diagnostics) = check_manifest(manifest, config.as_deref())?;
            let outcome = Outcome::from_diagnostics(&diagnostics);
            let mut sink = TracingSink;
            for diagnostic in diagnostics {
                sink.emit(diagnostic);
            }
            if *json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                print_model(&model);
            }
            Ok(outcome)
        }
    }
}

/// Parse the process arguments and execute the command
///
/// # Errors
///
/// See [`run`]
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    Ok(run(&cli)?.exit_code())
}

fn print_model(model: &RouterModel) {
    if model.is_empty() {
        println!("No routers would be generated.");
        return;
    }
    for provider in &model.providers {
        println!(
            "📦 {} → {} (authority: {})",
            provider.qualified_name,
            provider.router_qualified_name(),
            provider.authority
        );
        for bucket in &provider.buckets {
            println!("   [{}] {}", bucket.matcher_id, bucket.normalized_path);
            for route in &bucket.routes {
                println!(
                    "      {:<8} {} → {}",
                    route.operation().as_str(),
                    route.template.template(),
                    route.delegate.name
                );
            }
        }
    }
}
