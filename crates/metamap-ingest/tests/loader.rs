use std::fs;

use serde_json::json;
use tempfile::TempDir;

use metamap_ingest::{
    FsSchemaSource, IngestError, load_mapping_spec, load_study_records, write_document,
};
use metamap_model::{SchemaRef, StudyLayout};
use metamap_schema::{SchemaError, SchemaSource};

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn loads_a_mapping_spec_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "map.json",
        &json!({
            "uri": "file://mri.json",
            "study": { "PatientName": "patientName" },
            "series": { "Modality": "modality" }
        }),
    );

    let spec = load_mapping_spec(&path).unwrap();
    assert_eq!(spec.reference().map(SchemaRef::as_str), Some("file://mri.json"));
    assert_eq!(spec.scopes().len(), 2);
}

#[test]
fn malformed_spec_documents_are_reported_with_their_path() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "map.json", &json!({ "study": "not an object" }));

    let error = load_mapping_spec(&path).unwrap_err();
    assert!(matches!(error, IngestError::Spec { .. }));
    assert!(error.to_string().contains("map.json"));
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = TempDir::new().unwrap();
    let error = load_mapping_spec(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
}

#[test]
fn loads_series_records_tagged_with_the_layout_scope() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "records.json",
        &json!([
            { "studyInstanceUid": "1.2.3", "modality": "MR" },
            { "studyInstanceUid": "1.2.3", "modality": "PT" }
        ]),
    );

    let records = load_study_records(&path, &StudyLayout::default()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].scope().as_str(), "series");
    assert_eq!(records[1].get("modality"), Some(&json!("PT")));
}

#[test]
fn non_array_record_documents_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "records.json", &json!({ "modality": "MR" }));

    let error = load_study_records(&path, &StudyLayout::default()).unwrap_err();
    assert!(matches!(error, IngestError::Records { .. }));
}

#[test]
fn non_object_record_elements_are_rejected_with_their_index() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "records.json", &json!([{ "modality": "MR" }, 42]));

    let error = load_study_records(&path, &StudyLayout::default()).unwrap_err();
    assert!(error.to_string().contains("record 1"));
}

#[test]
fn fs_source_resolves_relative_and_file_uri_references() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "mri.json", &json!({ "properties": { "PatientName": {} } }));
    let source = FsSchemaSource::new(dir.path());

    let body = source.retrieve(&SchemaRef::new("mri.json").unwrap()).unwrap();
    assert_eq!(body, json!({ "properties": { "PatientName": {} } }));

    let body = source
        .retrieve(&SchemaRef::new("file://mri.json").unwrap())
        .unwrap();
    assert_eq!(body, json!({ "properties": { "PatientName": {} } }));
}

#[test]
fn fs_source_reports_unreadable_schemas_as_fetch_failures() {
    let dir = TempDir::new().unwrap();
    let source = FsSchemaSource::new(dir.path());

    let error = source
        .retrieve(&SchemaRef::new("absent.json").unwrap())
        .unwrap_err();
    assert!(matches!(error, SchemaError::Fetch { .. }));
}

#[test]
fn written_documents_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mapped_metadata.json");
    let document = json!({ "PatientName": "Doe^John", "series": [] });

    write_document(&path, &document).unwrap();
    let read: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read, document);
}
