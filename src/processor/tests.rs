use super::*;
use crate::binder::BindingKind;
use crate::diagnostics::Severity;
use crate::manifest::Operation;

const NOTES: &str = r#"
providers:
  - class: com.example.notes.NotesProvider
    authority: com.example.notes
    methods:
      - name: queryNotes
        operation: query
        template: /notes
        return_type: android.database.Cursor
        parameters:
          - name: projection
            type: java.lang.String[]
            annotations: [projection]
      - name: queryArchived
        operation: query
        template: /notes?archived=true&owner={owner}
        return_type: android.database.Cursor
        parameters:
          - name: owner
            type: java.lang.String
            annotations:
              - query_param: owner
      - name: queryNote
        operation: query
        template: /notes/{id}
        return_type: android.database.Cursor
        parameters:
          - name: id
            type: long
            annotations:
              - path_param: id
      - name: deleteNote
        operation: delete
        template: /notes/{id}
        return_type: int
        parameters:
          - name: id
            type: long
            annotations:
              - path_param: id
"#;

fn run(yaml: &str) -> RoundOutput {
    let manifest = Manifest::from_yaml_str(yaml).unwrap();
    process_manifest(&manifest, &GeneratorConfig::default())
}

#[test]
fn test_valid_provider_builds_model() {
    let output = run(NOTES);
    assert!(!output.has_errors());
    assert!(output.reporter.is_empty());

    let provider = output.model.provider("com.example.notes.NotesProvider").unwrap();
    assert_eq!(provider.router_class, "NotesProviderRouter");
    assert_eq!(provider.package, "com.example.notes");
    assert_eq!(
        provider.router_qualified_name(),
        "com.example.notes.NotesProviderRouter"
    );
    assert_eq!(provider.delegate_count(), 4);
    assert_eq!(
        provider.operations().into_iter().collect::<Vec<_>>(),
        vec![Operation::Query, Operation::Delete]
    );

    let ids: Vec<u32> = provider.buckets.iter().map(|b| b.matcher_id.get()).collect();
    assert_eq!(ids, vec![1, 2]);

    let notes = &provider.buckets[0];
    assert_eq!(notes.normalized_path, "/notes");
    let names: Vec<&str> = notes.routes.iter().map(|r| r.delegate.name.as_str()).collect();
    assert_eq!(names, vec!["queryArchived", "queryNotes"]);

    let by_id = &provider.buckets[1];
    assert_eq!(by_id.normalized_path, "/notes/*");
    assert_eq!(by_id.routes.len(), 2);
    assert_eq!(by_id.routes[0].template.matcher_id(), Some(by_id.matcher_id));
}

#[test]
fn test_duplicate_path_rejects_later_handler_only() {
    let yaml = r#"
providers:
  - class: com.example.A
    authority: com.example.a
    methods:
      - name: first
        operation: query
        template: /items?type={t}
        parameters:
          - name: t
            type: java.lang.String
            annotations: [{query_param: t}]
      - name: second
        operation: query
        template: /items?type={kind}
        parameters:
          - name: kind
            type: java.lang.String
            annotations: [{query_param: kind}]
"#;
    let output = run(yaml);
    assert_eq!(output.reporter.error_count(), 1);
    let diagnostic = &output.reporter.diagnostics()[0];
    assert_eq!(diagnostic.kind, "DuplicatePath");
    assert_eq!(diagnostic.element.to_string(), "com.example.A#second");
    assert!(diagnostic.message.contains("com.example.A#first"));

    let provider = &output.model.providers[0];
    assert_eq!(provider.delegate_count(), 1);
    assert_eq!(provider.buckets[0].routes[0].delegate.name, "first");
}

#[test]
fn test_invalid_handler_does_not_block_siblings() {
    let yaml = r#"
providers:
  - class: com.example.A
    authority: com.example.a
    methods:
      - name: broken
        operation: query
        template: /a?x?y
      - name: badParam
        operation: query
        template: /b/{id}
        parameters:
          - name: other
            type: long
            annotations: [{path_param: missing}]
      - name: good
        operation: query
        template: /c
"#;
    let output = run(yaml);
    let kinds: Vec<&str> = output
        .reporter
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["IllegalTemplate", "UnresolvedPlaceholder"]);

    let provider = &output.model.providers[0];
    assert_eq!(provider.delegate_count(), 1);
    assert_eq!(provider.buckets[0].normalized_path, "/c");
}

#[test]
fn test_failed_handler_does_not_claim_template() {
    let yaml = r#"
providers:
  - class: com.example.A
    authority: com.example.a
    methods:
      - name: broken
        operation: query
        template: /items
        parameters:
          - name: p
            type: int
            annotations: [projection]
      - name: fixed
        operation: query
        template: /items
"#;
    let output = run(yaml);
    assert_eq!(output.reporter.error_count(), 1);
    assert_eq!(output.reporter.diagnostics()[0].kind, "TypeMismatch");
    assert_eq!(output.model.providers[0].buckets[0].routes[0].delegate.name, "fixed");
}

#[test]
fn test_same_shape_different_operations() {
    let output = run(NOTES);
    let provider = &output.model.providers[0];
    let ops: Vec<Operation> = provider.buckets[1].routes.iter().map(|r| r.operation()).collect();
    assert_eq!(ops, vec![Operation::Query, Operation::Delete]);
}

#[test]
fn test_empty_authority_skips_class() {
    let yaml = r#"
providers:
  - class: com.example.NoAuthority
    methods:
      - name: q
        operation: query
        template: /x
  - class: com.example.Ok
    authority: ok
    methods:
      - name: q
        operation: query
        template: /x
"#;
    let output = run(yaml);
    assert_eq!(output.reporter.error_count(), 1);
    let diagnostic = &output.reporter.diagnostics()[0];
    assert_eq!(diagnostic.kind, "IllegalTemplate");
    assert_eq!(diagnostic.element.to_string(), "com.example.NoAuthority");
    assert_eq!(output.model.providers.len(), 1);
    assert_eq!(output.model.providers[0].simple_name, "Ok");
}

#[test]
fn test_authority_with_path_is_rejected() {
    let yaml = "providers:\n  - class: A\n    authority: a/b\n    methods:\n      - name: q\n        operation: query\n        template: /x\n";
    let output = run(yaml);
    assert!(output.has_errors());
    assert!(output.model.is_empty());
}

#[test]
fn test_provider_without_methods_warns() {
    let output = run("providers:\n  - class: com.example.Empty\n    authority: e\n");
    assert!(!output.has_errors());
    assert_eq!(output.reporter.warning_count(), 1);
    assert_eq!(output.reporter.diagnostics()[0].kind, "NoHandlers");
    assert!(output.model.is_empty());
}

#[test]
fn test_return_type_mismatch_is_warning() {
    let yaml = r#"
providers:
  - class: A
    authority: a
    methods:
      - name: insertNote
        operation: insert
        template: /notes
        return_type: long
"#;
    let output = run(yaml);
    assert!(!output.has_errors());
    assert_eq!(output.reporter.diagnostics()[0].kind, "ReturnType");
    assert_eq!(output.model.providers[0].package, "");
    assert_eq!(output.model.providers[0].router_qualified_name(), "ARouter");
}

#[test]
fn test_unclaimed_placeholder_is_warning() {
    let yaml = r#"
providers:
  - class: A
    authority: a
    methods:
      - name: q
        operation: query
        template: /notes/{id}
"#;
    let output = run(yaml);
    assert!(!output.has_errors());
    assert_eq!(output.reporter.diagnostics()[0].kind, "PlaceholderBinding");
    assert_eq!(output.model.providers[0].delegate_count(), 1);
}

#[test]
fn test_bindings_keep_parameter_order() {
    let yaml = r#"
providers:
  - class: A
    authority: a
    methods:
      - name: update
        operation: update
        template: /notes/{id}
        return_type: int
        parameters:
          - name: values
            type: android.content.ContentValues
            annotations: [content_values]
          - name: id
            type: long
            annotations: [{path_param: id}]
          - name: uri
            type: java.lang.String
"#;
    let output = run(yaml);
    let delegate = &output.model.providers[0].buckets[0].routes[0].delegate;
    let kinds: Vec<BindingKind> = delegate.bindings.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BindingKind::ContentValues,
            BindingKind::PathPlaceholder,
            BindingKind::RawString
        ]
    );
}

#[test]
fn test_custom_router_suffix() {
    let manifest =
        Manifest::from_yaml_str("providers:\n  - class: p.A\n    authority: a\n    methods:\n      - name: q\n        operation: query\n        template: /\n")
            .unwrap();
    let mut config = GeneratorConfig::default();
    config.output.router_suffix = "Dispatcher".to_string();
    let output = process_manifest(&manifest, &config);
    assert_eq!(output.model.providers[0].router_class, "ADispatcher");
    assert_eq!(output.model.providers[0].buckets[0].normalized_path, "/");
}

#[test]
fn test_errors_across_classes_accumulate() {
    let yaml = r#"
providers:
  - class: A
    authority: a
    methods:
      - name: q
        operation: query
        template: /a/{x}/{x}
  - class: B
    authority: b
    methods:
      - name: q
        operation: query
        template: /b
        parameters:
          - name: s
            type: java.lang.String
            annotations: [selection, sort_order]
"#;
    let output = run(yaml);
    let kinds: Vec<&str> = output
        .reporter
        .diagnostics()
        .iter()
        .map(|d| d.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["DuplicatePlaceholder", "ConflictingAnnotations"]);
    assert!(output.model.is_empty());
}

#[test]
fn test_repeated_provider_class_keeps_first_declaration() {
    let yaml = r#"
providers:
  - class: com.example.A
    authority: a.one
    methods:
      - name: first
        operation: query
        template: /x
  - class: com.example.A
    authority: a.two
    methods:
      - name: second
        operation: query
        template: /y
"#;
    let output = run(yaml);
    assert!(output.has_errors());
    assert_eq!(output.reporter.error_count(), 1);
    let diagnostic = &output.reporter.diagnostics()[0];
    assert_eq!(diagnostic.kind, "IllegalTemplate");
    assert_eq!(diagnostic.element.to_string(), "com.example.A");

    assert_eq!(output.model.providers.len(), 1);
    let provider = &output.model.providers[0];
    assert_eq!(provider.authority, "a.one");
    let routes: Vec<_> = provider.routes().collect();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].template.template(), "/x");
    assert_eq!(routes[0].template.authority(), "a.one");
    assert_eq!(routes[0].delegate.name, "first");
    assert_eq!(output.registry.len(), 1);
}

#[test]
fn test_empty_path_segments_warn() {
    let yaml = r#"
providers:
  - class: com.example.A
    authority: a
    methods:
      - name: root
        operation: query
        template: /
      - name: doubled
        operation: query
        template: /a//{x}
        parameters:
          - name: x
            type: long
            annotations: [{path_param: x}]
      - name: trailing
        operation: delete
        template: /notes/{id}/
        parameters:
          - name: id
            type: long
            annotations: [{path_param: id}]
"#;
    let output = run(yaml);
    assert!(!output.has_errors());
    let warned: Vec<String> = output
        .reporter
        .diagnostics()
        .iter()
        .filter(|d| d.kind == "EmptySegment")
        .map(|d| d.element.to_string())
        .collect();
    assert_eq!(warned, vec!["com.example.A#doubled", "com.example.A#trailing"]);
    assert_eq!(output.model.providers[0].delegate_count(), 3);
}
