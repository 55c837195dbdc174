use serde_json::json;

use metamap_map::{MapError, validate_batch};
use metamap_model::{AttributeRecord, Scope};

fn series_record(uid: &str) -> AttributeRecord {
    let mut record = AttributeRecord::new(Scope::new("series").unwrap());
    record.insert("studyInstanceUid", json!(uid));
    record
}

#[test]
fn agreeing_batch_passes() {
    let records = vec![
        series_record("1.2.3"),
        series_record("1.2.3"),
        series_record("1.2.3"),
    ];
    assert!(validate_batch(&records, "studyInstanceUid").is_ok());
}

#[test]
fn divergent_record_is_reported_with_index_and_value() {
    let records = vec![
        series_record("1.2.3"),
        series_record("1.2.3"),
        series_record("9.9.9"),
    ];

    let error = validate_batch(&records, "studyInstanceUid").unwrap_err();
    match error {
        MapError::InconsistentBatch {
            first,
            index,
            divergent,
        } => {
            assert_eq!(first, "1.2.3");
            assert_eq!(index, 2);
            assert_eq!(divergent, "9.9.9");
        }
        other => panic!("expected InconsistentBatch, got {other:?}"),
    }
}

#[test]
fn empty_and_single_record_batches_are_trivially_valid() {
    assert!(validate_batch(&[], "studyInstanceUid").is_ok());
    assert!(validate_batch(&[series_record("1.2.3")], "studyInstanceUid").is_ok());
}

#[test]
fn record_without_identifier_is_an_error() {
    let mut anonymous = AttributeRecord::new(Scope::new("series").unwrap());
    anonymous.insert("modality", json!("MR"));
    let records = vec![series_record("1.2.3"), anonymous];

    let error = validate_batch(&records, "studyInstanceUid").unwrap_err();
    assert!(matches!(
        error,
        MapError::MissingAttribute { attribute, .. } if attribute == "studyInstanceUid"
    ));
}

#[test]
fn comparison_is_value_equality_not_identity() {
    // Identifiers parsed from different documents must compare equal by value.
    let records = vec![series_record("1.2.3"), series_record(&"1.2.3".to_string())];
    assert!(validate_batch(&records, "studyInstanceUid").is_ok());
}
