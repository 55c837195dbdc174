//! Batch consistency validation.

use serde_json::Value;

use metamap_model::AttributeRecord;

use crate::MapError;

/// Check that every record in a batch agrees on the identifying attribute.
///
/// Comparison is value equality against the first record's value. Empty and
/// single-record batches are trivially valid. A record lacking the
/// identifying attribute fails with [`MapError::MissingAttribute`].
pub fn validate_batch(
    records: &[AttributeRecord],
    identifying_attribute: &str,
) -> Result<(), MapError> {
    let Some((first, rest)) = records.split_first() else {
        return Ok(());
    };
    let expected = identifier(first, identifying_attribute)?;

    for (offset, record) in rest.iter().enumerate() {
        let value = identifier(record, identifying_attribute)?;
        if value != expected {
            return Err(MapError::InconsistentBatch {
                first: display_value(expected),
                index: offset + 1,
                divergent: display_value(value),
            });
        }
    }
    Ok(())
}

fn identifier<'a>(
    record: &'a AttributeRecord,
    attribute: &str,
) -> Result<&'a Value, MapError> {
    record.get(attribute).ok_or_else(|| MapError::MissingAttribute {
        attribute: attribute.to_string(),
        scope: record.scope().to_string(),
    })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
