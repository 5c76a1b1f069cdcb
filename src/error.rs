//! Processing errors raised while compiling URI templates and binding handler
//! parameters.
//!
//! Every variant is local to one handler method (or one provider class). The
//! processing round turns them into [`Diagnostic`](crate::diagnostics::Diagnostic)
//! records and keeps going with the next handler.

use std::fmt;

/// A validation failure for one handler registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    /// The template is not a syntactically valid `path[?query]` string, or the
    /// resulting URI does not parse.
    IllegalTemplate {
        /// The template (or authority) being compiled
        template: String,
        /// What is wrong with it
        reason: String,
    },
    /// The same placeholder name appears twice in one template.
    ///
    /// Path and query placeholders share one namespace.
    DuplicatePlaceholder {
        /// The template being compiled
        template: String,
        /// The repeated placeholder name
        name: String,
        /// Location of the first occurrence
        existing: String,
        /// Location of the repeated occurrence
        duplicate: String,
    },
    /// A fully-equal template is already registered by another handler method.
    DuplicatePath {
        /// The template that was rejected
        template: String,
        /// Authority both registrations live under
        authority: String,
        /// `Class#method` of the handler that registered first
        existing_handler: String,
    },
    /// A parameter references a placeholder the template does not declare.
    UnresolvedPlaceholder {
        /// The parameter carrying the reference
        parameter: String,
        /// The placeholder name that could not be found
        placeholder: String,
        /// The template searched
        template: String,
    },
    /// A parameter carries more than one mutually-exclusive role annotation.
    ConflictingAnnotations {
        /// The offending parameter
        parameter: String,
        /// Every role found on the parameter, in declaration order
        roles: Vec<String>,
    },
    /// A role-annotated parameter does not have the type the role requires.
    TypeMismatch {
        /// The offending parameter
        parameter: String,
        /// The role annotation on the parameter
        role: String,
        /// The type the role requires
        required: String,
        /// The type the parameter declares
        found: String,
    },
    /// Two parameters claim the same placeholder.
    DuplicateBinding {
        /// The placeholder claimed twice
        placeholder: String,
        /// Parameter that claimed it first
        first: String,
        /// Parameter that claimed it again
        parameter: String,
    },
}

impl ProcessingError {
    /// Short, stable identifier for the error kind (used as the diagnostic kind).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessingError::IllegalTemplate { .. } => "IllegalTemplate",
            ProcessingError::DuplicatePlaceholder { .. } => "DuplicatePlaceholder",
            ProcessingError::DuplicatePath { .. } => "DuplicatePath",
            ProcessingError::UnresolvedPlaceholder { .. } => "UnresolvedPlaceholder",
            ProcessingError::ConflictingAnnotations { .. } => "ConflictingAnnotations",
            ProcessingError::TypeMismatch { .. } => "TypeMismatch",
            ProcessingError::DuplicateBinding { .. } => "DuplicateBinding",
        }
    }

    /// Name of the method parameter the error is attached to, if any.
    ///
    /// Template-level errors return `None` and are attached to the method.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ProcessingError::UnresolvedPlaceholder { parameter, .. }
            | ProcessingError::ConflictingAnnotations { parameter, .. }
            | ProcessingError::TypeMismatch { parameter, .. }
            | ProcessingError::DuplicateBinding { parameter, .. } => Some(parameter),
            ProcessingError::IllegalTemplate { .. }
            | ProcessingError::DuplicatePlaceholder { .. }
            | ProcessingError::DuplicatePath { .. } => None,
        }
    }

    pub(crate) fn illegal(template: &str, reason: impl Into<String>) -> Self {
        ProcessingError::IllegalTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::IllegalTemplate { template, reason } => {
                write!(f, "Illegal URI template '{}': {}", template, reason)
            }
            ProcessingError::DuplicatePlaceholder {
                template,
                name,
                existing,
                duplicate,
            } => write!(
                f,
                "Placeholder '{{{}}}' is declared twice in '{}': first at {}, again at {}",
                name, template, existing, duplicate
            ),
            ProcessingError::DuplicatePath {
                template,
                authority,
                existing_handler,
            } => write!(
                f,
                "URI '{}' under authority '{}' is already handled by {}",
                template, authority, existing_handler
            ),
            ProcessingError::UnresolvedPlaceholder {
                parameter,
                placeholder,
                template,
            } => write!(
                f,
                "Parameter '{}' references placeholder '{{{}}}' which does not exist in '{}'",
                parameter, placeholder, template
            ),
            ProcessingError::ConflictingAnnotations { parameter, roles } => write!(
                f,
                "Parameter '{}' carries mutually exclusive annotations: {}",
                parameter,
                roles.join(", ")
            ),
            ProcessingError::TypeMismatch {
                parameter,
                role,
                required,
                found,
            } => write!(
                f,
                "Parameter '{}' annotated as {} must be of type {} (found {})",
                parameter, role, required, found
            ),
            ProcessingError::DuplicateBinding {
                placeholder,
                first,
                parameter,
            } => write!(
                f,
                "Placeholder '{{{}}}' is already bound to parameter '{}' and cannot also bind '{}'",
                placeholder, first, parameter
            ),
        }
    }
}

impl std::error::Error for ProcessingError {}
