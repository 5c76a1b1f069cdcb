use serde::Serialize;
use std::fmt;

/// Where a placeholder lives inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    /// A whole path segment, keyed by its zero-based segment index
    Path,
    /// A query-string value, keyed by the query parameter name
    Query,
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderKind::Path => write!(f, "path"),
            PlaceholderKind::Query => write!(f, "query"),
        }
    }
}

/// A named hole in a URI template, e.g. `{id}` in `/notes/{id}`.
///
/// Created while parsing a template and owned by the
/// [`UriTemplateModel`](super::UriTemplateModel) that parsed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    name: String,
    kind: PlaceholderKind,
    key: String,
}

impl Placeholder {
    /// Placeholder occupying path segment `index` (zero-based, leading `/` stripped).
    pub fn path(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            kind: PlaceholderKind::Path,
            key: index.to_string(),
        }
    }

    /// Placeholder standing in for the value of query parameter `key`.
    pub fn query(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlaceholderKind::Query,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> PlaceholderKind {
        self.kind
    }

    /// The segment index (as text) for path placeholders, the query key otherwise.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Segment index for path placeholders.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self.kind {
            PlaceholderKind::Path => self.key.parse().ok(),
            PlaceholderKind::Query => None,
        }
    }

    /// Human readable location, used in diagnostics.
    #[must_use]
    pub fn describe_location(&self) -> String {
        match self.kind {
            PlaceholderKind::Path => format!("path segment {}", self.key),
            PlaceholderKind::Query => format!("query parameter '{}'", self.key),
        }
    }
}
