//! File loading for mapping specifications and study records.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use metamap_model::{AttributeRecord, MappingSpec, Scope, StudyLayout};

use crate::IngestError;

/// Load a mapping specification document from a JSON file.
pub fn load_mapping_spec(path: &Path) -> Result<MappingSpec, IngestError> {
    let value = read_json(path)?;
    let spec = MappingSpec::from_value(&value).map_err(|source| IngestError::Spec {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), scopes = spec.scopes().len(), "loaded mapping specification");
    Ok(spec)
}

/// Load a study's attribute records from a JSON file.
///
/// The document is an array with one flat attribute object per series.
/// Per-element attributes used by extension scopes are JSON arrays inside
/// those objects. Each record is tagged with the layout's series scope.
pub fn load_study_records(
    path: &Path,
    layout: &StudyLayout,
) -> Result<Vec<AttributeRecord>, IngestError> {
    let value = read_json(path)?;
    let Value::Array(elements) = value else {
        return Err(records_error(path, "expected a JSON array of record objects"));
    };

    let scope = Scope::new(layout.series_scope.as_str())
        .map_err(|error| records_error(path, error.to_string()))?;

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let Value::Object(attributes) = element else {
            return Err(records_error(
                path,
                format!("record {index} is not a JSON object"),
            ));
        };
        records.push(AttributeRecord::from_attributes(scope.clone(), attributes));
    }
    debug!(path = %path.display(), records = records.len(), "loaded study records");
    Ok(records)
}

/// Write a filled document to disk as pretty-printed JSON.
pub fn write_document(path: &Path, document: &Value) -> Result<(), IngestError> {
    let json =
        serde_json::to_string_pretty(document).map_err(|source| IngestError::json(path, source))?;
    fs::write(path, json).map_err(|source| IngestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value, IngestError> {
    let contents = fs::read_to_string(path).map_err(|source| IngestError::io(path, source))?;
    serde_json::from_str(&contents).map_err(|source| IngestError::json(path, source))
}

fn records_error(path: &Path, message: impl Into<String>) -> IngestError {
    IngestError::Records {
        path: path.to_path_buf(),
        message: message.into(),
    }
}
