use super::*;
use std::io::Write;

const YAML: &str = r#"
providers:
  - class: com.example.notes.NotesProvider
    authority: com.example.notes
    methods:
      - name: queryNote
        operation: query
        template: /notes/{id}
        return_type: android.database.Cursor
        parameters:
          - name: id
            type: long
            annotations:
              - path_param: id
          - name: projection
            type: java.lang.String[]
            annotations: [projection, NonNull]
"#;

#[test]
fn test_parse_yaml_manifest() {
    let manifest = Manifest::from_yaml_str(YAML).unwrap();
    assert_eq!(manifest.providers.len(), 1);
    let provider = &manifest.providers[0];
    assert_eq!(provider.simple_name(), "NotesProvider");
    assert_eq!(provider.package(), "com.example.notes");

    let method = &provider.methods[0];
    assert_eq!(method.operation, Operation::Query);
    assert_eq!(method.parameters[0].ty, "long");
    assert_eq!(
        method.parameters[0].annotations[0].entries(),
        vec![("path_param", Some("id"))]
    );
    assert_eq!(
        method.parameters[1].annotations,
        vec![
            AnnotationDecl::Marker("projection".to_string()),
            AnnotationDecl::Marker("NonNull".to_string()),
        ]
    );
}

#[test]
fn test_parse_json_manifest() {
    let json = r#"{"providers":[{"class":"Root","authority":"a","methods":[
        {"name":"t","operation":"get_type","template":"/"}]}]}"#;
    let manifest = Manifest::from_json_str(json).unwrap();
    let provider = &manifest.providers[0];
    assert_eq!(provider.package(), "");
    assert_eq!(provider.simple_name(), "Root");
    assert_eq!(provider.methods[0].operation, Operation::GetType);
    assert!(provider.methods[0].parameters.is_empty());
}

#[test]
fn test_unknown_operation_is_rejected() {
    let yaml = "providers:\n  - class: A\n    methods:\n      - name: m\n        operation: upsert\n        template: /\n";
    assert!(Manifest::from_yaml_str(yaml).is_err());
}

#[test]
fn test_load_manifest_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decls.yml");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(YAML.as_bytes())
        .unwrap();
    let manifest = load_manifest(&path).unwrap();
    assert_eq!(manifest.providers[0].methods.len(), 1);
}

#[test]
fn test_load_missing_manifest_names_file() {
    let err = load_manifest(std::path::Path::new("/nonexistent/decls.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("decls.yaml"));
}
