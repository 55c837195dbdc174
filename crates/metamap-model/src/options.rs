//! Configuration options for mapping behavior.

use serde::{Deserialize, Serialize};

/// How the mapper treats a declared source attribute that is absent from a
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingAttributePolicy {
    /// Fail the run with a missing-attribute error.
    ///
    /// This is the default: a mapping rule naming an attribute the source
    /// never produced is a specification defect worth surfacing.
    #[default]
    Fail,
    /// Substitute an explicit JSON null for the missing attribute.
    NullLeaf,
}

/// Options controlling mapping behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapOptions {
    pub missing_attributes: MissingAttributePolicy,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_missing_attributes(mut self, policy: MissingAttributePolicy) -> Self {
        self.missing_attributes = policy;
        self
    }
}

/// Names the designated scopes and identifying attribute for one study run.
///
/// The defaults match the conventional mapping-document layout: a `study`
/// root scope, a repeating `series` scope, and no extension scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyLayout {
    /// Scope mapped once from a representative record onto the document root.
    pub root_scope: String,
    /// Repeating scope mapped per record and nested under the root.
    pub series_scope: String,
    /// Extension scopes fanned out per record and nested under each series.
    pub extension_scopes: Vec<String>,
    /// Attribute every record in a batch must agree on.
    pub identifying_attribute: String,
}

impl Default for StudyLayout {
    fn default() -> Self {
        Self {
            root_scope: "study".to_string(),
            series_scope: "series".to_string(),
            extension_scopes: Vec::new(),
            identifying_attribute: "studyInstanceUid".to_string(),
        }
    }
}

impl StudyLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_extension_scopes(mut self, scopes: Vec<String>) -> Self {
        self.extension_scopes = scopes;
        self
    }

    #[must_use]
    pub fn with_identifying_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.identifying_attribute = attribute.into();
        self
    }
}
