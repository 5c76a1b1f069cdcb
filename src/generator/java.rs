//! Java source fragments used by the router template.

use crate::binder::{BindingKind, ParameterBinding};
use crate::config::TypeNames;
use crate::manifest::Operation;
use crate::template::{PathSegment, QueryParameter, QueryValue};

/// Quote `value` as a Java string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Text safe to place after `//` on a single line.
pub fn line_comment(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Name of the router entry point for `operation`.
pub fn method_name(operation: Operation) -> &'static str {
    match operation {
        Operation::Query => "query",
        Operation::Insert => "insert",
        Operation::Update => "update",
        Operation::Delete => "delete",
        Operation::GetType => "getType",
    }
}

/// Full signature of the router entry point for `operation`, without modifiers.
pub fn signature(operation: Operation, types: &TypeNames) -> String {
    let uri = &types.uri;
    let params = match operation {
        Operation::Query => format!(
            "{uri} uri, {} projection, {} selection, {} selectionArgs, {} sortOrder",
            types.string_array, types.string, types.string_array, types.string
        ),
        Operation::Insert => format!("{uri} uri, {} values", types.content_values),
        Operation::Update => format!(
            "{uri} uri, {} values, {} selection, {} selectionArgs",
            types.content_values, types.string, types.string_array
        ),
        Operation::Delete => format!(
            "{uri} uri, {} selection, {} selectionArgs",
            types.string, types.string_array
        ),
        Operation::GetType => format!("{uri} uri"),
    };
    format!(
        "{} {}({})",
        types.return_type_for(operation),
        method_name(operation),
        params
    )
}

/// Whether the entry point for `operation` receives the framework argument `kind`.
fn receives(operation: Operation, kind: BindingKind) -> bool {
    match kind {
        BindingKind::Projection | BindingKind::SortOrder => operation == Operation::Query,
        BindingKind::Selection | BindingKind::SelectionArgs => matches!(
            operation,
            Operation::Query | Operation::Update | Operation::Delete
        ),
        BindingKind::ContentValues => {
            matches!(operation, Operation::Insert | Operation::Update)
        }
        _ => true,
    }
}

/// Default value passed for a parameter the router has nothing to bind to.
pub fn default_value(ty: &str) -> &'static str {
    match ty {
        "boolean" => "false",
        "char" => "'\\0'",
        "byte" | "short" | "int" => "0",
        "long" => "0L",
        "float" => "0f",
        "double" => "0d",
        _ => "null",
    }
}

/// Convert the string expression `expr` to the declared type `ty`.
pub fn convert(expr: &str, ty: &str, types: &TypeNames) -> String {
    match ty {
        "long" => format!("Long.parseLong({expr})"),
        "int" => format!("Integer.parseInt({expr})"),
        "short" => format!("Short.parseShort({expr})"),
        "byte" => format!("Byte.parseByte({expr})"),
        "double" => format!("Double.parseDouble({expr})"),
        "float" => format!("Float.parseFloat({expr})"),
        "boolean" => format!("Boolean.parseBoolean({expr})"),
        "java.lang.Long" => format!("Long.valueOf({expr})"),
        "java.lang.Integer" => format!("Integer.valueOf({expr})"),
        "java.lang.Boolean" => format!("Boolean.valueOf({expr})"),
        _ if ty == types.uri => format!("{}.parse({expr})", types.uri),
        _ => expr.to_string(),
    }
}

/// Index of template segment `position` in `Uri.getPathSegments()`, which
/// drops empty segments.
pub fn runtime_segment_index(segments: &[PathSegment], position: usize) -> usize {
    let empty = segments
        .iter()
        .take(position)
        .filter(|segment| matches!(segment, PathSegment::Literal(text) if text.is_empty()))
        .count();
    position.saturating_sub(empty)
}

/// Path as `UriMatcher.addURI` expects it: no leading slash, no empty segments.
pub fn matcher_path(normalized_path: &str) -> String {
    normalized_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Argument expression for one bound parameter of a handler on a template
/// with path `segments`.
pub fn argument(
    binding: &ParameterBinding,
    segments: &[PathSegment],
    operation: Operation,
    types: &TypeNames,
) -> String {
    if !receives(operation, binding.kind) {
        return "null".to_string();
    }
    let key = binding.key.as_deref().unwrap_or_default();
    match binding.kind {
        BindingKind::PathPlaceholder => {
            let index = runtime_segment_index(segments, binding.position().unwrap_or_default());
            convert(
                &format!("uri.getPathSegments().get({index})"),
                &binding.declared_type,
                types,
            )
        }
        BindingKind::QueryPlaceholder => convert(
            &format!("uri.getQueryParameter({})", string_literal(key)),
            &binding.declared_type,
            types,
        ),
        BindingKind::Projection => "projection".to_string(),
        BindingKind::Selection => "selection".to_string(),
        BindingKind::SelectionArgs => "selectionArgs".to_string(),
        BindingKind::SortOrder => "sortOrder".to_string(),
        BindingKind::ContentValues => "values".to_string(),
        BindingKind::ContentUri => "uri".to_string(),
        BindingKind::Context => "delegate.getContext()".to_string(),
        BindingKind::RawString => "uri.toString()".to_string(),
        BindingKind::Unannotated => default_value(&binding.declared_type).to_string(),
    }
}

/// Guard a request must satisfy for a template's query string, empty if none.
pub fn query_condition(query: &[QueryParameter]) -> String {
    query
        .iter()
        .map(|param| {
            let lookup = format!("uri.getQueryParameter({})", string_literal(&param.key));
            match &param.value {
                QueryValue::Literal(value) => {
                    format!("{}.equals({lookup})", string_literal(value))
                }
                QueryValue::Wildcard => format!("{lookup} != null"),
            }
        })
        .collect::<Vec<_>>()
        .join(" && ")
}
