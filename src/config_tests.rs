use std::fs;

use tempfile::TempDir;

use crate::config::{parse_variable_assignment, Options};
use crate::error::Error;

#[test]
fn test_defaults() {
    let options = Options::default();
    assert!(options.warn_of_unresolved);
    assert!(options.variables.is_empty());
}

#[test]
fn test_json_options() {
    let options = Options::from_json(
        r##"{ "warnOfUnresolved": false, "variables": { "gap": 8, "brand": "#0af", "ratio": 1.5, "dark": true } }"##,
    )
    .unwrap();

    assert!(!options.warn_of_unresolved);
    assert_eq!(options.variables["gap"], "8");
    assert_eq!(options.variables["brand"], "#0af");
    assert_eq!(options.variables["ratio"], "1.5");
    assert_eq!(options.variables["dark"], "true");
}

#[test]
fn test_yaml_options_missing_fields_default() {
    let options = Options::from_yaml("variables:\n  size: 10px\n  fonts: \"Arial, sans-serif\"\n").unwrap();

    assert!(options.warn_of_unresolved);
    assert_eq!(options.variables.len(), 2);
    assert_eq!(options.variables["fonts"], "Arial, sans-serif");

    assert_eq!(Options::from_yaml("").unwrap(), Options::default());
    assert_eq!(Options::from_yaml("variables: ~\n").unwrap(), Options::default());
}

#[test]
fn test_from_file_picks_format_by_extension() {
    let dir = TempDir::new().unwrap();

    let json_path = dir.path().join("options.json");
    fs::write(&json_path, r#"{ "variables": { "a": "1" } }"#).unwrap();
    assert_eq!(Options::from_file(&json_path).unwrap().variables["a"], "1");

    let yaml_path = dir.path().join("options.yml");
    fs::write(&yaml_path, "warnOfUnresolved: false\n").unwrap();
    assert!(!Options::from_file(&yaml_path).unwrap().warn_of_unresolved);
}

#[test]
fn test_from_file_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(Options::from_file(&missing), Err(Error::Io { .. })));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    match Options::from_file(&broken) {
        Err(Error::Json { message, .. }) => assert!(message.contains("broken.json")),
        other => panic!("Expected JSON error, got {:?}", other),
    }
}

#[test]
fn test_merge_variables_overrides() {
    let mut options = Options::default().with_variable("a", "1").with_variable("b", "2");
    options.merge_variables(vec![("b".to_string(), "3".to_string())]);

    assert_eq!(options.variables["a"], "1");
    assert_eq!(options.variables["b"], "3");
}

#[test]
fn test_parse_variable_assignment() {
    assert_eq!(
        parse_variable_assignment("$primary = #333").unwrap(),
        ("primary".to_string(), "#333".to_string())
    );
    assert_eq!(
        parse_variable_assignment("list=a, b=c").unwrap(),
        ("list".to_string(), "a, b=c".to_string())
    );
    assert!(matches!(parse_variable_assignment("novalue"), Err(Error::InvalidArgument { .. })));
    assert!(matches!(parse_variable_assignment("=1"), Err(Error::InvalidArgument { .. })));
}
