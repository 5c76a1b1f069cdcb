//! # Diagnostics
//!
//! A pure aggregator for validation findings. Each stage of processing appends
//! records to a [`Reporter`] and keeps validating; nothing here stops a round.
//! At the end of the round the records are drained into a [`DiagnosticSink`]:
//! [`TracingSink`] forwards them to `tracing`, and a `Vec<Diagnostic>` simply
//! collects them.
//!
//! ```rust
//! use providerkit::diagnostics::{Diagnostic, Element, Reporter, Severity};
//!
//! let mut reporter = Reporter::new();
//! reporter.warn(Element::class("com.example.Empty"), "NoHandlers", "no handler methods");
//! assert!(!reporter.has_errors());
//!
//! let mut collected: Vec<Diagnostic> = Vec::new();
//! reporter.drain(&mut collected);
//! assert_eq!(collected[0].severity, Severity::Warn);
//! assert!(reporter.is_empty());
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::ProcessingError;

/// Diagnostic severity.
///
/// `Trace`, `Debug` and `Info` are informational notes; only `Error` makes
/// [`Reporter::has_errors`] true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Whether the severity surfaces as an informational note.
    #[must_use]
    pub fn is_note(self) -> bool {
        matches!(self, Severity::Trace | Severity::Debug | Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(s)
    }
}

/// The declaration a diagnostic is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Class {
        class: String,
    },
    Method {
        class: String,
        method: String,
    },
    Parameter {
        class: String,
        method: String,
        parameter: String,
    },
}

impl Element {
    pub fn class(class: impl Into<String>) -> Self {
        Element::Class {
            class: class.into(),
        }
    }

    pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Element::Method {
            class: class.into(),
            method: method.into(),
        }
    }

    /// Narrow a method element to one of its parameters. Class elements are
    /// returned unchanged.
    #[must_use]
    pub fn parameter(&self, parameter: &str) -> Self {
        match self {
            Element::Method { class, method } | Element::Parameter { class, method, .. } => {
                Element::Parameter {
                    class: class.clone(),
                    method: method.clone(),
                    parameter: parameter.to_string(),
                }
            }
            Element::Class { .. } => self.clone(),
        }
    }

    /// Qualified name of the enclosing class.
    #[must_use]
    pub fn class_name(&self) -> &str {
        match self {
            Element::Class { class }
            | Element::Method { class, .. }
            | Element::Parameter { class, .. } => class,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Class { class } => write!(f, "{class}"),
            Element::Method { class, method } => write!(f, "{class}#{method}"),
            Element::Parameter {
                class,
                method,
                parameter,
            } => write!(f, "{class}#{method}({parameter})"),
        }
    }
}

/// One recorded finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub element: Element,
    pub severity: Severity,
    /// Stable identifier, e.g. `DuplicatePath` or `ReturnType`
    pub kind: String,
}

/// Receives drained diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` with the element as a structured field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let element = diagnostic.element.to_string();
        let kind = diagnostic.kind.as_str();
        match diagnostic.severity {
            Severity::Error => {
                tracing::error!(element = %element, kind, "{}", diagnostic.message);
            }
            Severity::Warn => {
                tracing::warn!(element = %element, kind, "{}", diagnostic.message);
            }
            Severity::Info => {
                tracing::info!(element = %element, kind, note = true, "{}", diagnostic.message);
            }
            Severity::Debug => {
                tracing::debug!(element = %element, kind, note = true, "{}", diagnostic.message);
            }
            Severity::Trace => {
                tracing::trace!(element = %element, kind, note = true, "{}", diagnostic.message);
            }
        }
    }
}

/// Accumulates diagnostics for one processing round.
#[derive(Debug, Default, Clone)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(
        &mut self,
        element: Element,
        severity: Severity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            message: message.into(),
            element,
            severity,
            kind: kind.into(),
        });
    }

    /// Record a processing error.
    ///
    /// Errors naming a parameter are attached to that parameter of `element`.
    pub fn error(&mut self, element: &Element, error: &ProcessingError) {
        let element = match error.parameter() {
            Some(parameter) => element.parameter(parameter),
            None => element.clone(),
        };
        self.report(element, Severity::Error, error.kind(), error.to_string());
    }

    pub fn warn(&mut self, element: Element, kind: impl Into<String>, message: impl Into<String>) {
        self.report(element, Severity::Warn, kind, message);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warn)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Emit every record to `sink` in insertion order and clear.
    pub fn drain(&mut self, sink: &mut impl DiagnosticSink) {
        for diagnostic in self.diagnostics.drain(..) {
            sink.emit(diagnostic);
        }
    }
}

/// Print diagnostics to stdout grouped by severity.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("✅ No problems found!");
        return;
    }

    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    let warnings: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warn)
        .collect();
    let notes: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity.is_note())
        .collect();

    println!("\n📋 Processing Results:");
    println!(
        "   {} error(s), {} warning(s), {} note(s)\n",
        errors.len(),
        warnings.len(),
        notes.len()
    );

    for (title, group) in [
        ("❌ Errors:", &errors),
        ("⚠️  Warnings:", &warnings),
        ("ℹ️  Notes:", &notes),
    ] {
        if group.is_empty() {
            continue;
        }
        println!("{title}");
        for diagnostic in group.iter() {
            println!("   [{}] {}", diagnostic.kind, diagnostic.element);
            println!("      {}", diagnostic.message);
        }
        println!();
    }
}
