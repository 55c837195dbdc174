//! Integration tests for the `map` command.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use metamap_cli::cli::MapArgs;
use metamap_cli::commands::run_map;
use metamap_schema::SchemaCache;

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn study_fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    write_json(
        dir,
        "mri.json",
        &json!({
            "properties": {
                "PatientName": {},
                "series": { "items": { "properties": { "Modality": {} } } }
            }
        }),
    );
    let spec = write_json(
        dir,
        "map.json",
        &json!({
            "uri": "file://mri.json",
            "study": { "PatientName": "patientName" },
            "series": { "Modality": "modality" }
        }),
    );
    let records = write_json(
        dir,
        "records.json",
        &json!([
            { "studyInstanceUid": "1.2.3", "patientName": "Doe^John", "modality": "MR" },
            { "studyInstanceUid": "1.2.3", "patientName": "Doe^John", "modality": "PT" }
        ]),
    );
    (spec, records)
}

fn map_args(spec: PathBuf, records: PathBuf, out: PathBuf) -> MapArgs {
    MapArgs {
        spec,
        records,
        schema_dir: None,
        out,
        extensions: Vec::new(),
        identifier: None,
        null_missing: false,
        dry_run: false,
    }
}

#[test]
fn maps_a_study_folder_to_an_output_document() {
    let dir = TempDir::new().unwrap();
    let (spec, records) = study_fixture(&dir);
    let out = dir.path().join("mapped_metadata.json");

    let result = run_map(
        &map_args(spec, records, out.clone()),
        &Arc::new(SchemaCache::new()),
    )
    .unwrap();

    assert_eq!(result.records, 2);
    assert_eq!(result.reference, "file://mri.json");
    assert_eq!(result.output.as_deref(), Some(out.as_path()));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        document,
        json!({
            "PatientName": "Doe^John",
            "series": [ { "Modality": "MR" }, { "Modality": "PT" } ]
        })
    );
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (spec, records) = study_fixture(&dir);
    let out = dir.path().join("mapped_metadata.json");

    let mut args = map_args(spec, records, out.clone());
    args.dry_run = true;
    let result = run_map(&args, &Arc::new(SchemaCache::new())).unwrap();

    assert!(result.output.is_none());
    assert!(!out.exists());
}

#[test]
fn mixed_study_batches_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let (spec, _) = study_fixture(&dir);
    let records = write_json(
        &dir,
        "records.json",
        &json!([
            { "studyInstanceUid": "1.2.3", "patientName": "Doe^John", "modality": "MR" },
            { "studyInstanceUid": "9.9.9", "patientName": "Doe^John", "modality": "PT" }
        ]),
    );
    let out = dir.path().join("mapped_metadata.json");

    let error = run_map(
        &map_args(spec, records, out.clone()),
        &Arc::new(SchemaCache::new()),
    )
    .unwrap_err();

    assert!(format!("{error:#}").contains("9.9.9"));
    assert!(!out.exists());
}

#[test]
fn missing_attributes_can_be_mapped_to_null() {
    let dir = TempDir::new().unwrap();
    let (spec, _) = study_fixture(&dir);
    let records = write_json(
        &dir,
        "records.json",
        &json!([ { "studyInstanceUid": "1.2.3", "modality": "MR" } ]),
    );
    let out = dir.path().join("mapped_metadata.json");

    // Fails under the default policy...
    let error = run_map(
        &map_args(spec.clone(), records.clone(), out.clone()),
        &Arc::new(SchemaCache::new()),
    )
    .unwrap_err();
    assert!(format!("{error:#}").contains("patientName"));

    // ...and maps to null once explicitly opted in.
    let mut args = map_args(spec, records, out.clone());
    args.null_missing = true;
    run_map(&args, &Arc::new(SchemaCache::new())).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(document["PatientName"], json!(null));
}
