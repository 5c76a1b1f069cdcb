use serde::Serialize;
use url::Url;

use super::parser::{parse_template, RawQueryValue, Segment};
use super::placeholder::{Placeholder, PlaceholderKind};
use crate::error::ProcessingError;
use crate::matcher::MatcherId;

/// Marker that replaces placeholder segments in a normalized path.
pub const DEFAULT_WILDCARD: &str = "*";

/// Scheme used when checking that `authority + path` forms a URI.
pub const DEFAULT_URI_SCHEME: &str = "content";

/// Characters rejected anywhere in a template path. Braces are allowed because
/// an unbalanced `{` is a literal segment.
const FORBIDDEN_PATH_CHARS: &[char] = &['#', '"', '<', '>', '\\', '^', '`', '|'];

/// Normalized value of one query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryValue {
    /// The template fixes the value, e.g. `limit=10`
    Literal(String),
    /// The value is a placeholder; any value matches
    Wildcard,
}

/// One `key=value` pair of the template's query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameter {
    pub key: String,
    pub value: QueryValue,
    /// Placeholder name when `value` is a wildcard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// One segment of the template path after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PathSegment {
    Literal(String),
    Placeholder(String),
}

/// Normalized form of one `path[?query]` template under an authority.
///
/// Two models are *structurally equal* when authority and normalized path
/// match; they then share a matcher bucket. They are *fully equal* when their
/// query parameters (names and values) also match, which is a duplicate
/// registration.
#[derive(Debug, Clone, Serialize)]
pub struct UriTemplateModel {
    template: String,
    authority: String,
    normalized_path: String,
    segments: Vec<PathSegment>,
    query: Vec<QueryParameter>,
    placeholders: Vec<Placeholder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matcher_id: Option<MatcherId>,
}

impl UriTemplateModel {
    /// Start building a model for `template` under `authority`.
    pub fn builder(
        authority: impl Into<String>,
        template: impl Into<String>,
    ) -> UriTemplateModelBuilder {
        UriTemplateModelBuilder {
            authority: authority.into(),
            template: template.into(),
            wildcard: DEFAULT_WILDCARD.to_string(),
            scheme: DEFAULT_URI_SCHEME.to_string(),
        }
    }

    /// Parse with the default wildcard marker and URI scheme.
    pub fn parse(authority: &str, template: &str) -> Result<Self, Vec<ProcessingError>> {
        Self::builder(authority, template).build()
    }

    /// The template string exactly as it was declared.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Path with every placeholder segment replaced by the wildcard marker.
    #[must_use]
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Query parameters in source order.
    #[must_use]
    pub fn query_parameters(&self) -> &[QueryParameter] {
        &self.query
    }

    #[must_use]
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    #[must_use]
    pub fn placeholder(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn contains_placeholder(&self, name: &str) -> bool {
        self.placeholder(name).is_some()
    }

    /// Path position (as text) or query key of a placeholder.
    #[must_use]
    pub fn placeholder_location(&self, name: &str) -> Option<&str> {
        self.placeholder(name).map(Placeholder::key)
    }

    #[must_use]
    pub fn placeholder_kind(&self, name: &str) -> Option<PlaceholderKind> {
        self.placeholder(name).map(Placeholder::kind)
    }

    #[must_use]
    pub fn query_parameter_count(&self) -> usize {
        self.query.len()
    }

    #[must_use]
    pub fn matcher_id(&self) -> Option<MatcherId> {
        self.matcher_id
    }

    /// Assign the matcher id. The first assignment wins; later calls are ignored
    /// and report `false` when they disagree with the stored id.
    pub(crate) fn assign_matcher_id(&mut self, id: MatcherId) -> bool {
        match self.matcher_id {
            None => {
                self.matcher_id = Some(id);
                true
            }
            Some(existing) => existing == id,
        }
    }

    /// Same authority and normalized path; the query string is ignored.
    #[must_use]
    pub fn structurally_equals(&self, other: &UriTemplateModel) -> bool {
        self.authority == other.authority && self.normalized_path == other.normalized_path
    }

    /// Structurally equal and the query parameters agree key by key.
    ///
    /// Order of the query pairs does not matter. A wildcard value only matches
    /// another wildcard at the same key, never a literal.
    #[must_use]
    pub fn fully_equals(&self, other: &UriTemplateModel) -> bool {
        self.structurally_equals(other)
            && self.query.len() == other.query.len()
            && self.query.iter().all(|param| {
                other
                    .query
                    .iter()
                    .any(|o| o.key == param.key && o.value == param.value)
            })
    }
}

/// Validating builder for [`UriTemplateModel`].
#[derive(Debug, Clone)]
pub struct UriTemplateModelBuilder {
    authority: String,
    template: String,
    wildcard: String,
    scheme: String,
}

impl UriTemplateModelBuilder {
    /// Marker substituted for placeholder segments (default `*`).
    pub fn wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    /// Scheme used to validate `scheme://authority/path` (default `content`).
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Parse, normalize and validate the template.
    ///
    /// Returns every problem found, not just the first.
    pub fn build(self) -> Result<UriTemplateModel, Vec<ProcessingError>> {
        let parsed = parse_template(&self.template)?;

        let segments: Vec<PathSegment> = parsed
            .segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => PathSegment::Literal(text),
                Segment::Placeholder(name) => PathSegment::Placeholder(name),
            })
            .collect();

        let normalized_path = normalize_path(&segments, &self.wildcard);
        validate_uri(&self.scheme, &self.authority, &normalized_path, &self.template)
            .map_err(|err| vec![err])?;

        let query = parsed
            .query
            .into_iter()
            .map(|(key, value)| match value {
                RawQueryValue::Literal(text) => QueryParameter {
                    key,
                    value: QueryValue::Literal(text),
                    placeholder: None,
                },
                RawQueryValue::Placeholder(name) => QueryParameter {
                    key,
                    value: QueryValue::Wildcard,
                    placeholder: Some(name),
                },
            })
            .collect();

        Ok(UriTemplateModel {
            template: self.template,
            authority: self.authority,
            normalized_path,
            segments,
            query,
            placeholders: parsed.placeholders,
            matcher_id: None,
        })
    }
}

fn normalize_path(segments: &[PathSegment], wildcard: &str) -> String {
    let joined = segments
        .iter()
        .map(|segment| match segment {
            PathSegment::Literal(text) => text.as_str(),
            PathSegment::Placeholder(_) => wildcard,
        })
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}

fn validate_uri(
    scheme: &str,
    authority: &str,
    normalized_path: &str,
    template: &str,
) -> Result<(), ProcessingError> {
    if let Some(bad) = normalized_path
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_PATH_CHARS.contains(c))
    {
        return Err(ProcessingError::illegal(
            template,
            format!("invalid character {:?} in path", bad),
        ));
    }

    let candidate = format!("{}://{}{}", scheme, authority, normalized_path);
    Url::parse(&candidate).map_err(|err| {
        ProcessingError::illegal(template, format!("'{}' is not a valid URI: {}", candidate, err))
    })?;
    Ok(())
}
