use crate::config::TypeNames;
use crate::error::ProcessingError;
use crate::manifest::ParameterDecl;
use crate::template::PlaceholderKind;

/// The closed set of role annotations a handler parameter may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterRole {
    Projection,
    Selection,
    SelectionArgs,
    SortOrder,
    ContentValues,
    ContentUri,
    Context,
    /// Claims the path placeholder with this name
    PathParam(String),
    /// Claims the query placeholder with this name
    QueryParam(String),
}

impl ParameterRole {
    /// Map one annotation to a role. Non-role annotations return `None`.
    ///
    /// Names are matched ignoring case, underscores and any package prefix, so
    /// `sort_order`, `SortOrder` and `com.example.annotation.SortOrder` are the
    /// same role. A placeholder annotation without a value claims the
    /// placeholder named like the parameter.
    #[must_use]
    pub fn from_annotation(name: &str, value: Option<&str>, parameter: &str) -> Option<Self> {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let normalized: String = simple
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let placeholder = || value.unwrap_or(parameter).to_string();
        let role = match normalized.as_str() {
            "projection" => ParameterRole::Projection,
            "selection" => ParameterRole::Selection,
            "selectionargs" => ParameterRole::SelectionArgs,
            "sortorder" => ParameterRole::SortOrder,
            "contentvalues" => ParameterRole::ContentValues,
            "contenturi" => ParameterRole::ContentUri,
            "context" => ParameterRole::Context,
            "pathparam" => ParameterRole::PathParam(placeholder()),
            "queryparam" => ParameterRole::QueryParam(placeholder()),
            _ => return None,
        };
        Some(role)
    }

    /// Annotation name used in diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ParameterRole::Projection => "projection",
            ParameterRole::Selection => "selection",
            ParameterRole::SelectionArgs => "selection_args",
            ParameterRole::SortOrder => "sort_order",
            ParameterRole::ContentValues => "content_values",
            ParameterRole::ContentUri => "content_uri",
            ParameterRole::Context => "context",
            ParameterRole::PathParam(_) => "path_param",
            ParameterRole::QueryParam(_) => "query_param",
        }
    }

    /// The exact declared type the role requires, if it constrains the type.
    #[must_use]
    pub fn required_type<'a>(&self, types: &'a TypeNames) -> Option<&'a str> {
        match self {
            ParameterRole::Projection | ParameterRole::SelectionArgs => Some(types.string_array.as_str()),
            ParameterRole::Selection | ParameterRole::SortOrder => Some(types.string.as_str()),
            ParameterRole::ContentValues => Some(types.content_values.as_str()),
            ParameterRole::ContentUri => Some(types.uri.as_str()),
            ParameterRole::Context => Some(types.context.as_str()),
            ParameterRole::PathParam(_) | ParameterRole::QueryParam(_) => None,
        }
    }

    /// Placeholder name and declared location for placeholder roles.
    #[must_use]
    pub fn placeholder(&self) -> Option<(&str, PlaceholderKind)> {
        match self {
            ParameterRole::PathParam(name) => Some((name.as_str(), PlaceholderKind::Path)),
            ParameterRole::QueryParam(name) => Some((name.as_str(), PlaceholderKind::Query)),
            _ => None,
        }
    }
}

/// Classify a parameter by its annotations, computed once per parameter.
///
/// Returns `Ok(None)` for a parameter without any role annotation and
/// [`ProcessingError::ConflictingAnnotations`] when more than one is present.
pub fn classify(parameter: &ParameterDecl) -> Result<Option<ParameterRole>, ProcessingError> {
    let mut roles: Vec<ParameterRole> = parameter
        .annotations
        .iter()
        .flat_map(|annotation| annotation.entries())
        .filter_map(|(name, value)| ParameterRole::from_annotation(name, value, &parameter.name))
        .collect();

    if roles.len() > 1 {
        return Err(ProcessingError::ConflictingAnnotations {
            parameter: parameter.name.clone(),
            roles: roles.iter().map(|r| r.label().to_string()).collect(),
        });
    }
    Ok(roles.pop())
}
