//! Flat attribute records extracted from one source unit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Scope;

/// A flat named-attribute view of one source unit (a study or series),
/// tagged with the scope it was produced for.
///
/// Attribute order is the order the producer inserted them in; lookups are
/// by name only. Per-element attributes used by extension scopes are stored
/// as JSON arrays with one element per sub-object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    scope: Scope,
    attributes: serde_json::Map<String, Value>,
}

impl AttributeRecord {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn from_attributes(scope: Scope, attributes: serde_json::Map<String, Value>) -> Self {
        Self { scope, attributes }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Insert or replace one attribute value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
