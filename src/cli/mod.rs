//! # CLI Module
//!
//! Command-line interface of the `providerkit-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! providerkit-gen generate --manifest decls.yaml --output src/main/java
//! ```
//!
//! Options:
//! - `--manifest <FILE>` - Declaration manifest (required)
//! - `--output <DIR>` - Source root for generated routers (default: `generated`)
//! - `--config <FILE>` - Generator config (default: `providerkit.toml` next to the manifest)
//! - `--model-json <FILE>` - Also dump the processed model
//! - `--force` - Overwrite existing router files
//! - `--dry-run` - Show what would be written
//!
//! Routers for valid providers are written even when other handlers fail
//! validation; the exit code is 1 whenever an error was reported.
//!
//! ### `check`
//!
//! ```bash
//! providerkit-gen check --manifest decls.yaml
//! ```
//!
//! ### `inspect`
//!
//! ```bash
//! providerkit-gen inspect --manifest decls.yaml --json
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, Outcome};
