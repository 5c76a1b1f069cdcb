//! Tokenizer for the `/seg/{name}?key={name}&key2=literal` template grammar.

use once_cell::sync::Lazy;
use regex::Regex;

use super::placeholder::Placeholder;
use crate::error::ProcessingError;

/// A whole path segment of the form `{name}`. Anything else, including
/// unbalanced braces, is a literal segment.
#[allow(clippy::expect_used)]
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^}]+)\}$").expect("placeholder pattern is valid"));

/// One `/`-separated piece of the template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Value side of a `key=value` query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawQueryValue {
    Literal(String),
    Placeholder(String),
}

/// Output of [`parse_template`]: positional path segments, ordered query pairs
/// and the placeholders they declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub segments: Vec<Segment>,
    pub query: Vec<(String, RawQueryValue)>,
    pub placeholders: Vec<Placeholder>,
}

/// Returns the placeholder name if `text` is exactly `{name}`.
pub(crate) fn placeholder_name(text: &str) -> Option<&str> {
    PLACEHOLDER_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a `path[?query]` template.
///
/// Problems are collected rather than returned on the first hit, so one call
/// reports every malformed query pair and every repeated placeholder. A second
/// `?` stops parsing immediately because the query boundary is ambiguous.
pub fn parse_template(template: &str) -> Result<ParsedTemplate, Vec<ProcessingError>> {
    if template.matches('?').count() > 1 {
        return Err(vec![ProcessingError::illegal(
            template,
            "invalid path: more than one '?' separator",
        )]);
    }

    let (path, query) = match template.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (template, None),
    };

    let mut errors = Vec::new();
    let mut placeholders: Vec<Placeholder> = Vec::new();

    let segments = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .enumerate()
        .map(|(index, segment)| match placeholder_name(segment) {
            Some(name) => {
                declare(
                    template,
                    &mut placeholders,
                    &mut errors,
                    Placeholder::path(name, index),
                );
                Segment::Placeholder(name.to_string())
            }
            None => Segment::Literal(segment.to_string()),
        })
        .collect();

    let mut pairs: Vec<(String, RawQueryValue)> = Vec::new();
    let query = query.unwrap_or("").trim_start_matches(['?', '&']);
    for element in query.split('&').filter(|e| !e.is_empty()) {
        let parts: Vec<&str> = element.split('=').collect();
        let (key, value) = match parts.as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => (*key, *value),
            _ => {
                errors.push(ProcessingError::illegal(
                    template,
                    format!("malformed query parameter '{}', expected key=value", element),
                ));
                continue;
            }
        };
        if pairs.iter().any(|(existing, _)| existing == key) {
            errors.push(ProcessingError::illegal(
                template,
                format!("query parameter '{}' appears more than once", key),
            ));
            continue;
        }
        let value = match placeholder_name(value) {
            Some(name) => {
                declare(
                    template,
                    &mut placeholders,
                    &mut errors,
                    Placeholder::query(name, key),
                );
                RawQueryValue::Placeholder(name.to_string())
            }
            None => RawQueryValue::Literal(value.to_string()),
        };
        pairs.push((key.to_string(), value));
    }

    if errors.is_empty() {
        Ok(ParsedTemplate {
            segments,
            query: pairs,
            placeholders,
        })
    } else {
        Err(errors)
    }
}

/// Record a placeholder, refusing to overwrite an earlier one with the same name.
fn declare(
    template: &str,
    placeholders: &mut Vec<Placeholder>,
    errors: &mut Vec<ProcessingError>,
    placeholder: Placeholder,
) {
    if let Some(existing) = placeholders.iter().find(|p| p.name() == placeholder.name()) {
        errors.push(ProcessingError::DuplicatePlaceholder {
            template: template.to_string(),
            name: placeholder.name().to_string(),
            existing: existing.describe_location(),
            duplicate: placeholder.describe_location(),
        });
        return;
    }
    placeholders.push(placeholder);
}
