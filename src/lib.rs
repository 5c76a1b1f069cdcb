//! # providerkit
//!
//! **providerkit** compiles URI templates declared on content-provider handler
//! methods into a routing model and renders a router class for each provider.
//!
//! ## Overview
//!
//! Handler methods are addressed by templates such as
//! `/notes/{id}?format={fmt}&v=2` under a provider's authority. For one batch
//! of declarations the crate:
//!
//! 1. parses each template into a normalized [`UriTemplateModel`]
//! 2. groups templates by authority and normalized path, assigning each group a
//!    matcher id, and rejects duplicate registrations
//! 3. binds every handler parameter to a placeholder or a framework argument
//! 4. collects all validation problems as diagnostics instead of stopping at
//!    the first one
//! 5. renders the resulting model as Java source
//!
//! ## Architecture
//!
//! - **[`template`]** - Placeholder parser and URI template model
//! - **[`matcher`]** - Matcher registry: bucketing, ids and duplicate detection
//! - **[`binder`]** - Parameter role classification and binding
//! - **[`processor`]** - One processing round over a manifest
//! - **[`diagnostics`]** - Diagnostic reporter and sinks
//! - **[`manifest`]** - Declaration manifest loading (YAML/JSON)
//! - **[`config`]** - `providerkit.toml` generator configuration
//! - **[`generator`]** - Askama-based router rendering
//! - **[`cli`]** - `providerkit-gen` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ## Example
//!
//! ```rust
//! use providerkit::config::GeneratorConfig;
//! use providerkit::manifest::Manifest;
//! use providerkit::processor::process_manifest;
//!
//! let manifest = Manifest::from_yaml_str(r#"
//! providers:
//!   - class: com.example.notes.NotesProvider
//!     authority: com.example.notes
//!     methods:
//!       - name: queryNote
//!         operation: query
//!         template: /notes/{id}
//!         parameters:
//!           - name: id
//!             type: long
//!             annotations: [{path_param: id}]
//! "#).unwrap();
//!
//! let output = process_manifest(&manifest, &GeneratorConfig::default());
//! assert!(!output.has_errors());
//! let provider = &output.model.providers[0];
//! assert_eq!(provider.router_class, "NotesProviderRouter");
//! assert_eq!(provider.buckets[0].normalized_path, "/notes/*");
//! ```

pub mod binder;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod matcher;
pub mod processor;
pub mod template;

pub use diagnostics::{Diagnostic, Reporter, Severity};
pub use error::ProcessingError;
pub use manifest::{load_manifest, Manifest};
pub use matcher::{MatcherId, MatcherRegistry};
pub use processor::{process_manifest, ProcessingRound, RouterModel};
pub use template::UriTemplateModel;
