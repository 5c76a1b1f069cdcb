//! # Parameter Binder
//!
//! Matches each declared handler parameter to its role with respect to one
//! [`UriTemplateModel`]: a path or query placeholder, one of the typed framework
//! arguments (projection, selection, content values, ...), or an unannotated
//! pass-through.
//!
//! Binding never stops at the first problem. Every parameter is checked and
//! all errors are returned together; a method with any error gets no binding.
//!
//! A placeholder may be claimed at most once; a second claim is a
//! [`ProcessingError::DuplicateBinding`]. A placeholder no parameter claims is
//! only a warning in [`BoundParameters::warnings`]: the router still matches the
//! URI and simply does not pass that value on.
//!
//! ```rust
//! use providerkit::binder::{bind_parameters, BindingKind};
//! use providerkit::config::TypeNames;
//! use providerkit::manifest::{AnnotationDecl, ParameterDecl};
//! use providerkit::template::UriTemplateModel;
//! use std::collections::BTreeMap;
//!
//! let template = UriTemplateModel::parse("com.example.notes", "/notes/{id}").unwrap();
//! let id = ParameterDecl {
//!     name: "id".into(),
//!     ty: "long".into(),
//!     annotations: vec![AnnotationDecl::Valued(BTreeMap::from([(
//!         "path_param".to_string(),
//!         "id".to_string(),
//!     )]))],
//! };
//! let bound = bind_parameters(&[id], &template, &TypeNames::default()).unwrap();
//! assert_eq!(bound.bindings[0].kind, BindingKind::PathPlaceholder);
//! assert_eq!(bound.bindings[0].position(), Some(1));
//! ```

mod binding;
mod roles;

pub use binding::{BindingKind, ParameterBinding};
pub use roles::{classify, ParameterRole};

use std::collections::HashMap;

use crate::config::TypeNames;
use crate::error::ProcessingError;
use crate::manifest::ParameterDecl;
use crate::template::UriTemplateModel;

/// Successful binding of a method's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundParameters {
    /// One binding per parameter, in declaration order
    pub bindings: Vec<ParameterBinding>,
    /// Non-fatal findings (unclaimed placeholders, path/query annotation mix-ups)
    pub warnings: Vec<String>,
}

/// Bind `parameters` against `template`.
///
/// # Errors
///
/// Returns every [`ProcessingError`] found across all parameters.
pub fn bind_parameters(
    parameters: &[ParameterDecl],
    template: &UriTemplateModel,
    types: &TypeNames,
) -> Result<BoundParameters, Vec<ProcessingError>> {
    let mut bindings = Vec::with_capacity(parameters.len());
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut claimed: HashMap<&str, &str> = HashMap::new();

    for parameter in parameters {
        let role = match classify(parameter) {
            Ok(role) => role,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        let Some(role) = role else {
            let kind = if parameter.ty == types.string {
                BindingKind::RawString
            } else {
                BindingKind::Unannotated
            };
            bindings.push(ParameterBinding::plain(&parameter.name, &parameter.ty, kind));
            continue;
        };

        if let Some(required) = role.required_type(types) {
            if parameter.ty != required {
                errors.push(ProcessingError::TypeMismatch {
                    parameter: parameter.name.clone(),
                    role: role.label().to_string(),
                    required: required.to_string(),
                    found: parameter.ty.clone(),
                });
                continue;
            }
        }

        if let Some(kind) = BindingKind::for_role(&role) {
            bindings.push(ParameterBinding::plain(&parameter.name, &parameter.ty, kind));
            continue;
        }

        let Some((name, declared_kind)) = role.placeholder() else {
            continue;
        };
        let Some(placeholder) = template.placeholder(name) else {
            errors.push(ProcessingError::UnresolvedPlaceholder {
                parameter: parameter.name.clone(),
                placeholder: name.to_string(),
                template: template.template().to_string(),
            });
            continue;
        };
        if let Some(first) = claimed.get(placeholder.name()) {
            errors.push(ProcessingError::DuplicateBinding {
                placeholder: placeholder.name().to_string(),
                first: (*first).to_string(),
                parameter: parameter.name.clone(),
            });
            continue;
        }
        claimed.insert(placeholder.name(), &parameter.name);

        if placeholder.kind() != declared_kind {
            warnings.push(format!(
                "parameter '{}' is annotated as a {} placeholder but '{{{}}}' is a {} placeholder at {}",
                parameter.name,
                declared_kind,
                name,
                placeholder.kind(),
                placeholder.describe_location()
            ));
        }
        bindings.push(ParameterBinding::placeholder(
            &parameter.name,
            &parameter.ty,
            placeholder,
        ));
    }

    for placeholder in template.placeholders() {
        if !claimed.contains_key(placeholder.name()) {
            warnings.push(format!(
                "placeholder '{{{}}}' at {} is not bound to any parameter",
                placeholder.name(),
                placeholder.describe_location()
            ));
        }
    }

    if errors.is_empty() {
        Ok(BoundParameters { bindings, warnings })
    } else {
        Err(errors)
    }
}
