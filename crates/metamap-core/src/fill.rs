//! Skeleton-directed assembly of the final document.
//!
//! Filling walks the skeleton, not the mapping object: skeleton order is
//! authoritative for output key order, and a schema may declare more fields
//! than any mapping populates. The skeleton is never mutated; filling
//! produces a new document.

use serde_json::{Map, Value};

use metamap_model::{MappingObject, MappingValue};
use metamap_schema::{SchemaNode, SchemaSkeleton};

/// The final document, shape-isomorphic to the skeleton it was filled from.
pub type FilledDocument = Value;

#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error("field '{name}' expects a {expected} but the mapping holds a {found}")]
    NodeShape {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Fill a skeleton from a root mapping object.
///
/// - Leaf: the mapped scalar, or an explicit null when unmapped.
/// - Object: recurse with the nested mapping object, or with an empty one
///   when unmapped, preserving shape as an all-null sub-document.
/// - Array-of-objects: fill the element template once per sequence element
///   in source order, or an empty array when unmapped.
///
/// The only failure is a shape confusion between the skeleton node and the
/// mapped value, reported as [`FillError::NodeShape`].
pub fn fill(
    skeleton: &SchemaSkeleton,
    mapping: &MappingObject,
) -> Result<FilledDocument, FillError> {
    fill_fields(skeleton.roots(), mapping)
}

fn fill_fields(nodes: &[SchemaNode], mapping: &MappingObject) -> Result<Value, FillError> {
    let mut fields = Map::new();
    for node in nodes {
        fields.insert(node.name().to_string(), fill_node(node, mapping)?);
    }
    Ok(Value::Object(fields))
}

fn fill_node(node: &SchemaNode, mapping: &MappingObject) -> Result<Value, FillError> {
    match node {
        SchemaNode::Leaf(name) => match mapping.get(name) {
            Some(MappingValue::Scalar(value)) => Ok(value.clone()),
            Some(other) => Err(shape_error(name, "scalar value", other)),
            None => Ok(Value::Null),
        },
        SchemaNode::Object { name, children } => match mapping.get(name) {
            Some(MappingValue::Object(nested)) => fill_fields(children, nested),
            Some(other) => Err(shape_error(name, "nested object", other)),
            None => fill_fields(children, &MappingObject::new()),
        },
        SchemaNode::ArrayOfObjects { name, element } => match mapping.get(name) {
            Some(MappingValue::Sequence(elements)) => {
                let filled = elements
                    .iter()
                    .map(|nested| fill_fields(element, nested))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(filled))
            }
            Some(other) => Err(shape_error(name, "sequence of objects", other)),
            None => Ok(Value::Array(Vec::new())),
        },
    }
}

fn shape_error(name: &str, expected: &'static str, found: &MappingValue) -> FillError {
    FillError::NodeShape {
        name: name.to_string(),
        expected,
        found: found.shape(),
    }
}
