use std::fs;
use std::path::PathBuf;

use ephys_session::MetadataSource;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn none_resolves_to_empty_map() {
    let map = MetadataSource::None.resolve().unwrap();
    assert!(map.is_empty());
}

#[test]
fn inline_map_passes_through() {
    let mut map = serde_json::Map::new();
    map.insert("rig".to_string(), json!("booth-2"));
    let resolved = MetadataSource::Inline(map.clone()).resolve().unwrap();
    assert_eq!(resolved, map);
}

#[test]
fn file_source_reads_json_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session_info.json");
    fs::write(&path, r#"{"rig": "booth-2", "weight_g": 23.5}"#).unwrap();

    let map = MetadataSource::FromFile(path).resolve().unwrap();
    assert_eq!(map.get("rig").unwrap(), &json!("booth-2"));
    assert_eq!(map.get("weight_g").unwrap(), &json!(23.5));
}

#[test]
fn missing_file_is_malformed_metadata() {
    let err = MetadataSource::FromFile(PathBuf::from("/nonexistent/session_info.json"))
        .resolve()
        .unwrap_err();
    assert_eq!(err.info().code, "metadata-file");
}

#[test]
fn text_source_parses_json_object() {
    let map = MetadataSource::FromText(r#"{"notes": "first probe session"}"#.to_string())
        .resolve()
        .unwrap();
    assert_eq!(map.get("notes").unwrap(), &json!("first probe session"));
}

#[test]
fn invalid_json_text_is_malformed_metadata() {
    let err = MetadataSource::FromText("rig=booth-2".to_string())
        .resolve()
        .unwrap_err();
    assert_eq!(err.info().code, "metadata-parse");
}

#[test]
fn non_object_json_is_malformed_metadata() {
    let err = MetadataSource::FromText("[1, 2, 3]".to_string())
        .resolve()
        .unwrap_err();
    assert_eq!(err.info().code, "metadata-not-object");
}
