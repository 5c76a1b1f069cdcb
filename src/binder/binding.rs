use serde::Serialize;
use std::fmt;

use super::roles::ParameterRole;
use crate::template::{Placeholder, PlaceholderKind};

/// What the generated router passes for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    PathPlaceholder,
    QueryPlaceholder,
    Projection,
    Selection,
    SelectionArgs,
    SortOrder,
    ContentValues,
    ContentUri,
    Context,
    /// Unannotated `String` parameter: receives the request URI as text
    RawString,
    /// Unannotated parameter of any other type: receives the type's default value
    Unannotated,
}

impl BindingKind {
    pub(crate) fn for_role(role: &ParameterRole) -> Option<Self> {
        let kind = match role {
            ParameterRole::Projection => BindingKind::Projection,
            ParameterRole::Selection => BindingKind::Selection,
            ParameterRole::SelectionArgs => BindingKind::SelectionArgs,
            ParameterRole::SortOrder => BindingKind::SortOrder,
            ParameterRole::ContentValues => BindingKind::ContentValues,
            ParameterRole::ContentUri => BindingKind::ContentUri,
            ParameterRole::Context => BindingKind::Context,
            ParameterRole::PathParam(_) | ParameterRole::QueryParam(_) => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BindingKind::PathPlaceholder => "path-placeholder",
            BindingKind::QueryPlaceholder => "query-placeholder",
            BindingKind::Projection => "projection",
            BindingKind::Selection => "selection",
            BindingKind::SelectionArgs => "selection-args",
            BindingKind::SortOrder => "sort-order",
            BindingKind::ContentValues => "content-values",
            BindingKind::ContentUri => "content-uri",
            BindingKind::Context => "context",
            BindingKind::RawString => "raw-string",
            BindingKind::Unannotated => "unannotated",
        };
        f.write_str(s)
    }
}

/// A method parameter's role with respect to one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    pub parameter: String,
    /// Declared type; doubles as the value conversion hint for placeholders
    pub declared_type: String,
    pub kind: BindingKind,
    /// Claimed placeholder, for placeholder bindings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Segment index (as text) or query key copied from the placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ParameterBinding {
    pub(crate) fn plain(parameter: &str, declared_type: &str, kind: BindingKind) -> Self {
        Self {
            parameter: parameter.to_string(),
            declared_type: declared_type.to_string(),
            kind,
            placeholder: None,
            key: None,
        }
    }

    pub(crate) fn placeholder(parameter: &str, declared_type: &str, placeholder: &Placeholder) -> Self {
        let kind = match placeholder.kind() {
            PlaceholderKind::Path => BindingKind::PathPlaceholder,
            PlaceholderKind::Query => BindingKind::QueryPlaceholder,
        };
        Self {
            parameter: parameter.to_string(),
            declared_type: declared_type.to_string(),
            kind,
            placeholder: Some(placeholder.name().to_string()),
            key: Some(placeholder.key().to_string()),
        }
    }

    /// Path segment index for path placeholder bindings.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            BindingKind::PathPlaceholder => self.key.as_deref().and_then(|k| k.parse().ok()),
            _ => None,
        }
    }
}
