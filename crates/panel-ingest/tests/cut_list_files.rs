use std::fs;

use panel_ingest::{IngestError, read_cut_list};
use panel_model::{PartDimensions, ParamValue};

#[test]
fn reads_tab_separated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kitchen.tsv");
    fs::write(
        &path,
        "Part\tLength\tWidth\tThickness\tL\tW\tHinges\tServices\n\
         Door\t720\t397\t18\tX\t\t2\tKN-CTR\n",
    )
    .unwrap();

    let cut_list = read_cut_list(&path).unwrap();
    assert_eq!(cut_list.len(), 1);
    let door = &cut_list.parts[0];
    assert_eq!(door.label.as_deref(), Some("Door"));
    assert_eq!(
        door.dimensions,
        Some(PartDimensions::new(720.0, 397.0).with_thickness(18.0))
    );
    assert_eq!(door.edgeband.columns.get("L"), Some(&ParamValue::from("X")));
    assert_eq!(door.edgeband.columns.get("W"), Some(&ParamValue::from("")));
    assert_eq!(door.drilling.columns.get("Hinges"), Some(&ParamValue::from("2")));
    assert_eq!(door.drilling.tokens, vec!["KN-CTR"]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = read_cut_list(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
}
