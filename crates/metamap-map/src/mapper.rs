//! Projection of attribute records through mapping-spec fragments.

use serde_json::Value;
use tracing::warn;

use metamap_model::{
    AttributeRecord, MapOptions, MappingObject, MappingValue, MissingAttributePolicy, ScopeMapping,
};

use crate::MapError;

/// Project one record through a scope fragment into a mapping object.
///
/// Rules are applied in declaration order and the result preserves that
/// order. Record attributes not named by any rule are excluded. A declared
/// source attribute absent from the record fails with
/// [`MapError::MissingAttribute`], unless the options opt into substituting
/// an explicit null.
pub fn map_scope(
    fragment: &ScopeMapping,
    record: &AttributeRecord,
    options: &MapOptions,
) -> Result<MappingObject, MapError> {
    let mut object = MappingObject::new();
    for rule in fragment.rules() {
        match record.get(&rule.source) {
            Some(value) => object.push(rule.target.as_str(), MappingValue::Scalar(value.clone())),
            None => {
                missing_attribute(fragment, &rule.source, options)?;
                object.push(rule.target.as_str(), MappingValue::Scalar(Value::Null));
            }
        }
    }
    Ok(object)
}

/// Fan out parallel per-element sequences into one mapping object per
/// element.
///
/// Every source attribute named by the fragment must hold a sequence, and
/// all sequences must share one length N; the i-th output object maps each
/// target key to the i-th element of its source sequence. N = 0 produces an
/// empty vector. Under the null-substitution policy a missing attribute
/// contributes null to every element.
pub fn expand_extension(
    fragment: &ScopeMapping,
    record: &AttributeRecord,
    options: &MapOptions,
) -> Result<Vec<MappingObject>, MapError> {
    let mut columns: Vec<(&str, Option<&Vec<Value>>)> = Vec::with_capacity(fragment.len());
    let mut expected: Option<usize> = None;

    for rule in fragment.rules() {
        match record.get(&rule.source) {
            Some(Value::Array(elements)) => {
                match expected {
                    Some(length) if elements.len() != length => {
                        return Err(MapError::ExtensionLengthMismatch {
                            attribute: rule.source.clone(),
                            expected: length,
                            actual: elements.len(),
                        });
                    }
                    Some(_) => {}
                    None => expected = Some(elements.len()),
                }
                columns.push((rule.target.as_str(), Some(elements)));
            }
            Some(_) => {
                return Err(MapError::ExtensionNotSequence {
                    attribute: rule.source.clone(),
                });
            }
            None => {
                missing_attribute(fragment, &rule.source, options)?;
                columns.push((rule.target.as_str(), None));
            }
        }
    }

    let count = expected.unwrap_or(0);
    let mut objects = Vec::with_capacity(count);
    for index in 0..count {
        let mut object = MappingObject::new();
        for (target, elements) in &columns {
            let value = match elements {
                Some(elements) => elements[index].clone(),
                None => Value::Null,
            };
            object.push(*target, MappingValue::Scalar(value));
        }
        objects.push(object);
    }
    Ok(objects)
}

fn missing_attribute(
    fragment: &ScopeMapping,
    attribute: &str,
    options: &MapOptions,
) -> Result<(), MapError> {
    match options.missing_attributes {
        MissingAttributePolicy::Fail => Err(MapError::MissingAttribute {
            attribute: attribute.to_string(),
            scope: fragment.scope().to_string(),
        }),
        MissingAttributePolicy::NullLeaf => {
            warn!(
                attribute,
                scope = %fragment.scope(),
                "substituting null for missing source attribute"
            );
            Ok(())
        }
    }
}
