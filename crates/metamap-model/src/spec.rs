//! The declarative mapping specification document.
//!
//! The external document shape is a single JSON object: a `uri` member
//! naming the schema to fetch, plus one member per scope, each an object
//! assigning target schema keys to source attribute names:
//!
//! ```json
//! {
//!   "uri": "https://example.org/schemas/mri-study.json",
//!   "study": { "PatientName": "patientName" },
//!   "series": { "Modality": "modality" },
//!   "image": { "ImagePosition": "imagePositions" }
//! }
//! ```
//!
//! Member order is preserved: rule order within a scope is the declaration
//! order and is authoritative for mapping-object entry order.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{ModelError, SchemaRef, Scope};

/// One assignment of a target schema key to a source attribute name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MappingRule {
    pub target: String,
    pub source: String,
}

/// The ordered rules declared for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMapping {
    scope: Scope,
    rules: Vec<MappingRule>,
}

impl ScopeMapping {
    pub fn new(scope: Scope, rules: Vec<MappingRule>) -> Self {
        Self { scope, rules }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// A parsed mapping specification: the schema reference plus the declared
/// scope fragments in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingSpec {
    reference: Option<SchemaRef>,
    scopes: Vec<ScopeMapping>,
}

impl MappingSpec {
    pub fn new(reference: Option<SchemaRef>, scopes: Vec<ScopeMapping>) -> Self {
        Self { reference, scopes }
    }

    /// Parse the external document shape described in the module docs.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        let members = value.as_object().ok_or(ModelError::SpecNotObject)?;

        let mut reference = None;
        let mut scopes = Vec::new();
        for (name, member) in members {
            if name == "uri" {
                let uri = member
                    .as_str()
                    .ok_or_else(|| ModelError::InvalidSchemaRef(member.to_string()))?;
                reference = Some(SchemaRef::new(uri)?);
                continue;
            }

            let fragment = member.as_object().ok_or_else(|| ModelError::ScopeNotObject {
                scope: name.clone(),
            })?;
            let scope = Scope::new(name.clone())?;
            let mut rules = Vec::with_capacity(fragment.len());
            for (target, source) in fragment {
                let source = source.as_str().ok_or_else(|| ModelError::RuleNotString {
                    scope: name.clone(),
                    target: target.clone(),
                })?;
                rules.push(MappingRule {
                    target: target.clone(),
                    source: source.to_string(),
                });
            }
            scopes.push(ScopeMapping::new(scope, rules));
        }

        Ok(Self { reference, scopes })
    }

    /// The schema reference, if the document declared one.
    pub fn reference(&self) -> Option<&SchemaRef> {
        self.reference.as_ref()
    }

    /// Look up the fragment declared for a scope name.
    pub fn scope(&self, name: &str) -> Option<&ScopeMapping> {
        self.scopes.iter().find(|s| s.scope().as_str() == name)
    }

    pub fn scopes(&self) -> &[ScopeMapping] {
        &self.scopes
    }
}

impl<'de> Deserialize<'de> for MappingSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
