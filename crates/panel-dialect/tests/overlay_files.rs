//! Loading organization overlays from disk.

use std::fs;

use panel_dialect::{
    ColumnKey, DialectError, DialectOverlay, RuleTransform, default_config, merge_with_default,
};
use panel_model::ServiceFamily;

#[test]
fn loads_json_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme.json");
    fs::write(
        &path,
        r#"{
            "org_id": "acme",
            "edgeband": {
                "aliases": { "full": "2L2W" },
                "columns": { "Kante vorne": "W1" }
            },
            "drilling": {
                "presets": { "std": { "code": "H3-90", "diameter_mm": 26.0 } },
                "rules": [
                    { "id": "scharnier", "pattern": "(\\d)\\s*scharniere", "priority": 5,
                      "transform": { "kind": "code", "template": "H$1" } }
                ]
            }
        }"#,
    )
    .unwrap();

    let overlay = DialectOverlay::from_path(&path).unwrap();
    let dialect = merge_with_default(&default_config(), &overlay);

    assert_eq!(dialect.org_id(), Some("acme"));
    assert_eq!(dialect.alias(ServiceFamily::EdgeBand, "Full"), Some("2L2W"));
    assert_eq!(
        dialect.column_key(ServiceFamily::EdgeBand, "KANTE VORNE"),
        Some(ColumnKey::W1)
    );
    assert!(dialect.config().drilling.presets.contains_key("STD"));
    assert!(dialect.config().drilling.presets.contains_key("DOOR-HINGE"));

    let rules = dialect.rules(ServiceFamily::Drilling);
    assert_eq!(rules.len(), 1);
    assert_eq!(
        overlay.drilling.rules[0].transform,
        RuleTransform::Code {
            template: "H$1".to_string()
        }
    );
}

#[test]
fn loads_toml_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme.toml");
    fs::write(
        &path,
        r#"
org_id = "acme"

[groove]
yes_values = ["JA"]

[groove.aliases]
"RUECKWAND" = "BPG"
"#,
    )
    .unwrap();

    let overlay = DialectOverlay::from_path(&path).unwrap();
    let dialect = merge_with_default(&default_config(), &overlay);
    assert_eq!(dialect.alias(ServiceFamily::Groove, "rueckwand"), Some("BPG"));
    assert!(dialect.is_yes(ServiceFamily::Groove, "ja"));
    assert!(!dialect.is_yes(ServiceFamily::Groove, "X"));
}

#[test]
fn rejects_unknown_extension_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme.yaml");
    fs::write(&path, "org_id: acme").unwrap();
    assert!(matches!(
        DialectOverlay::from_path(&path),
        Err(DialectError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        DialectOverlay::from_path(&dir.path().join("missing.json")),
        Err(DialectError::Io { .. })
    ));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(
        DialectOverlay::from_json_str("{ not json"),
        Err(DialectError::Json(_))
    ));
}
