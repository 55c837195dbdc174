//! Ordered traversal skeletons derived from raw schema bodies.
//!
//! The builder classifies every declared field into one of three node
//! kinds and nothing else, so downstream consumers can match exhaustively:
//!
//! - a declaration carrying a `properties` object is an [`SchemaNode::Object`];
//! - a declaration carrying an `items` member whose value itself carries
//!   `properties` is an [`SchemaNode::ArrayOfObjects`];
//! - anything else is a [`SchemaNode::Leaf`] — including arrays of plain
//!   values, whose elements are scalars as far as filling is concerned.
//!
//! Child order is the declaration order in the schema body and is
//! authoritative for output key order.

use serde_json::Value;

use crate::{SchemaBody, SchemaError};

/// One node of the traversal skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A field filled with a single value.
    Leaf(String),
    /// A field holding nested named fields.
    Object {
        name: String,
        children: Vec<SchemaNode>,
    },
    /// A field holding a repeated collection of objects, described by one
    /// element template.
    ArrayOfObjects {
        name: String,
        element: Vec<SchemaNode>,
    },
}

impl SchemaNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(name) => name,
            Self::Object { name, .. } => name,
            Self::ArrayOfObjects { name, .. } => name,
        }
    }
}

/// Ordered skeleton built from one schema body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSkeleton {
    roots: Vec<SchemaNode>,
}

impl SchemaSkeleton {
    pub fn roots(&self) -> &[SchemaNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Build the traversal skeleton for a schema body.
///
/// Pure and deterministic: equal bodies produce structurally equal
/// skeletons. No validation against source data happens here.
///
/// The root field set is the body's top-level `properties` member when one
/// is present, otherwise the body's own top-level members.
pub fn build_skeleton(body: &SchemaBody) -> Result<SchemaSkeleton, SchemaError> {
    let members = body
        .as_object()
        .ok_or_else(|| SchemaError::malformed("schema body must be a JSON object"))?;

    let fields = match members.get("properties") {
        Some(properties) => properties
            .as_object()
            .ok_or_else(|| SchemaError::malformed("top-level 'properties' must be a JSON object"))?,
        None => members,
    };

    Ok(SchemaSkeleton {
        roots: build_fields(fields)?,
    })
}

fn build_fields(
    fields: &serde_json::Map<String, Value>,
) -> Result<Vec<SchemaNode>, SchemaError> {
    fields
        .iter()
        .map(|(name, declaration)| classify(name, declaration))
        .collect()
}

fn classify(name: &str, declaration: &Value) -> Result<SchemaNode, SchemaError> {
    if let Some(members) = declaration.as_object() {
        if let Some(properties) = members.get("properties") {
            let children = properties.as_object().ok_or_else(|| {
                SchemaError::malformed(format!("'properties' of field '{name}' must be an object"))
            })?;
            return Ok(SchemaNode::Object {
                name: name.to_string(),
                children: build_fields(children)?,
            });
        }

        if let Some(items) = members.get("items")
            && let Some(item_members) = items.as_object()
            && let Some(properties) = item_members.get("properties")
        {
            let children = properties.as_object().ok_or_else(|| {
                SchemaError::malformed(format!(
                    "'items.properties' of field '{name}' must be an object"
                ))
            })?;
            return Ok(SchemaNode::ArrayOfObjects {
                name: name.to_string(),
                element: build_fields(children)?,
            });
        }
    }

    Ok(SchemaNode::Leaf(name.to_string()))
}
