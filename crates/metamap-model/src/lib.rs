pub mod error;
pub mod ids;
pub mod mapping;
pub mod options;
pub mod record;
pub mod spec;

pub use error::ModelError;
pub use ids::{SchemaRef, Scope};
pub use mapping::{MappingObject, MappingValue};
pub use options::{MapOptions, MissingAttributePolicy, StudyLayout};
pub use record::AttributeRecord;
pub use spec::{MappingRule, MappingSpec, ScopeMapping};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_rejects_blank_names() {
        assert!(Scope::new("  ").is_err());
        assert_eq!(Scope::new(" series ").unwrap().as_str(), "series");
    }

    #[test]
    fn schema_ref_keeps_value_verbatim() {
        let reference = SchemaRef::new("file://schemas/mri.json").unwrap();
        assert_eq!(reference.as_str(), "file://schemas/mri.json");
        assert_eq!(reference.to_string(), "file://schemas/mri.json");
    }

    #[test]
    fn default_layout_matches_conventional_documents() {
        let layout = StudyLayout::default();
        assert_eq!(layout.root_scope, "study");
        assert_eq!(layout.series_scope, "series");
        assert_eq!(layout.identifying_attribute, "studyInstanceUid");
        assert!(layout.extension_scopes.is_empty());
    }
}
