use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The operation a handler method serves (its method-level role annotation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Query,
    Insert,
    Update,
    Delete,
    GetType,
}

impl Operation {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::GetType => "get_type",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation attached to a method parameter.
///
/// Either a bare marker (`projection`) or a single-entry map carrying a value
/// (`path_param: id`). Annotations that are not role annotations are kept and
/// ignored during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationDecl {
    Marker(String),
    Valued(BTreeMap<String, String>),
}

impl AnnotationDecl {
    /// `(name, value)` pairs this entry declares.
    pub fn entries(&self) -> Vec<(&str, Option<&str>)> {
        match self {
            AnnotationDecl::Marker(name) => vec![(name.as_str(), None)],
            AnnotationDecl::Valued(map) => map
                .iter()
                .map(|(name, value)| (name.as_str(), Some(value.as_str())))
                .collect(),
        }
    }
}

/// One declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    /// Fully qualified declared type, e.g. `java.lang.String[]`
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationDecl>,
}

/// One annotated handler method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub operation: Operation,
    /// Value of the method's role annotation: `path[?query]`
    pub template: String,
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

/// One annotated provider class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDecl {
    /// Qualified class name
    pub class: String,
    #[serde(default)]
    pub authority: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ProviderDecl {
    /// Class name without its package.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.class
            .rsplit_once('.')
            .map_or(self.class.as_str(), |(_, simple)| simple)
    }

    /// Package of the class, empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        self.class.rsplit_once('.').map_or("", |(package, _)| package)
    }
}

/// Every annotated declaration discovered in one processing round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub providers: Vec<ProviderDecl>,
}
