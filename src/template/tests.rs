use super::*;
use crate::error::ProcessingError;

const AUTHORITY: &str = "com.example.notes";

fn model(template: &str) -> UriTemplateModel {
    UriTemplateModel::parse(AUTHORITY, template).unwrap()
}

fn errors(template: &str) -> Vec<ProcessingError> {
    UriTemplateModel::parse(AUTHORITY, template).unwrap_err()
}

#[test]
fn test_path_placeholder_position() {
    let m = model("/users/{id}");
    assert_eq!(m.normalized_path(), "/users/*");
    assert_eq!(m.placeholders().len(), 1);
    let id = m.placeholder("id").unwrap();
    assert_eq!(id.kind(), PlaceholderKind::Path);
    assert_eq!(id.key(), "1");
    assert_eq!(id.position(), Some(1));
}

#[test]
fn test_query_placeholder_and_literal() {
    let m = model("/search?q={term}&limit=10");
    assert_eq!(m.normalized_path(), "/search");
    assert_eq!(m.query_parameter_count(), 2);
    assert_eq!(m.placeholder_kind("term"), Some(PlaceholderKind::Query));
    assert_eq!(m.placeholder_location("term"), Some("q"));

    let params = m.query_parameters();
    assert_eq!(params[0].key, "q");
    assert_eq!(params[0].value, QueryValue::Wildcard);
    assert_eq!(params[0].placeholder.as_deref(), Some("term"));
    assert_eq!(params[1].key, "limit");
    assert_eq!(params[1].value, QueryValue::Literal("10".to_string()));
}

#[test]
fn test_query_order_is_preserved() {
    let m = model("/a?z=1&m={x}&b=2");
    let keys: Vec<_> = m.query_parameters().iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["z", "m", "b"]);
}

#[test]
fn test_root_templates() {
    assert_eq!(model("").normalized_path(), "/");
    assert_eq!(model("/").normalized_path(), "/");
    assert_eq!(model("/?").query_parameter_count(), 0);
}

#[test]
fn test_empty_query_section_is_legal() {
    let m = model("/notes?");
    assert_eq!(m.normalized_path(), "/notes");
    assert_eq!(m.query_parameter_count(), 0);
}

#[test]
fn test_unbalanced_brace_is_literal() {
    let m = model("/files/{name");
    assert_eq!(m.normalized_path(), "/files/{name");
    assert!(m.placeholders().is_empty());

    let m = model("/files/{a}.json");
    assert_eq!(m.normalized_path(), "/files/{a}.json");
    assert!(!m.contains_placeholder("a"));
}

#[test]
fn test_multiple_question_marks_rejected() {
    let errs = errors("/a?x=1?y=2");
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], ProcessingError::IllegalTemplate { .. }));
}

#[test]
fn test_malformed_query_pairs_all_reported() {
    let errs = errors("/a?x&y=1=2&z=3");
    assert_eq!(errs.len(), 2);
    assert!(errs
        .iter()
        .all(|e| matches!(e, ProcessingError::IllegalTemplate { .. })));
}

#[test]
fn test_duplicate_path_placeholder() {
    let errs = errors("/a/{x}/{x}");
    assert_eq!(errs.len(), 1);
    match &errs[0] {
        ProcessingError::DuplicatePlaceholder {
            name,
            existing,
            duplicate,
            ..
        } => {
            assert_eq!(name, "x");
            assert_eq!(existing, "path segment 1");
            assert_eq!(duplicate, "path segment 2");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_placeholder_namespace_shared_between_path_and_query() {
    let errs = errors("/a/{x}?k={x}");
    match &errs[0] {
        ProcessingError::DuplicatePlaceholder {
            existing,
            duplicate,
            ..
        } => {
            assert_eq!(existing, "path segment 1");
            assert_eq!(duplicate, "query parameter 'k'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_duplicate_query_key_rejected() {
    let errs = errors("/a?k=1&k=2");
    assert!(matches!(errs[0], ProcessingError::IllegalTemplate { .. }));
}

#[test]
fn test_invalid_path_character() {
    let errs = errors("/notes/with space");
    assert!(matches!(errs[0], ProcessingError::IllegalTemplate { .. }));
}

#[test]
fn test_invalid_authority_wraps_parse_error() {
    let errs = UriTemplateModel::parse("bad host", "/notes").unwrap_err();
    match &errs[0] {
        ProcessingError::IllegalTemplate { reason, .. } => {
            assert!(reason.contains("not a valid URI"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_normalized_path_is_idempotent() {
    let first = model("/users/{id}/posts/{post}?q={term}");
    let second = model(first.normalized_path());
    assert_eq!(second.normalized_path(), first.normalized_path());
    assert!(second.placeholders().is_empty());
}

#[test]
fn test_custom_wildcard() {
    let m = UriTemplateModel::builder(AUTHORITY, "/users/{id}")
        .wildcard("#")
        .build();
    // '#' would start a fragment, so it cannot be used as a path marker
    assert!(m.is_err());

    let m = UriTemplateModel::builder(AUTHORITY, "/users/{id}")
        .wildcard("_")
        .build()
        .unwrap();
    assert_eq!(m.normalized_path(), "/users/_");
}

#[test]
fn test_structural_and_full_equality() {
    let a = model("/notes/{id}?v=1");
    let b = model("/notes/{note}?v=2");
    let c = model("/notes/{other}?v=1");
    assert!(a.structurally_equals(&b));
    assert!(!a.fully_equals(&b));
    assert!(a.fully_equals(&c));
}

#[test]
fn test_full_equality_ignores_query_order() {
    let a = model("/notes?a=1&b={x}");
    let b = model("/notes?b={y}&a=1");
    assert!(a.fully_equals(&b));
}

#[test]
fn test_wildcard_never_equals_literal() {
    let a = model("/notes?a={x}");
    let b = model("/notes?a=1");
    assert!(a.structurally_equals(&b));
    assert!(!a.fully_equals(&b));
}

#[test]
fn test_matcher_id_assigned_once() {
    let mut m = model("/notes");
    assert_eq!(m.matcher_id(), None);
    assert!(m.assign_matcher_id(crate::matcher::MatcherId::new(3)));
    assert!(!m.assign_matcher_id(crate::matcher::MatcherId::new(4)));
    assert_eq!(m.matcher_id(), Some(crate::matcher::MatcherId::new(3)));
}
