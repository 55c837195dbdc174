#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema_source;

pub use error::IngestError;
pub use loader::{load_mapping_spec, load_study_records, write_document};
pub use schema_source::FsSchemaSource;
