//! Filesystem-backed schema retrieval.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use metamap_model::SchemaRef;
use metamap_schema::{SchemaBody, SchemaError, SchemaSource};

/// Resolves schema references against a base directory.
///
/// A `file://` prefix on the reference is stripped; relative references
/// resolve against the base directory, absolute ones are used as-is. Any
/// read or parse failure is reported as a fetch failure for the reference,
/// which the cache never stores. Transports other than the filesystem live
/// behind their own [`SchemaSource`] implementations.
#[derive(Debug, Clone)]
pub struct FsSchemaSource {
    base_dir: PathBuf,
}

impl FsSchemaSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, reference: &SchemaRef) -> PathBuf {
        let raw = reference
            .as_str()
            .strip_prefix("file://")
            .unwrap_or(reference.as_str());
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl SchemaSource for FsSchemaSource {
    fn retrieve(&self, reference: &SchemaRef) -> Result<SchemaBody, SchemaError> {
        let path = self.resolve(reference);
        debug!(reference = %reference, path = %path.display(), "reading schema file");
        let contents = fs::read_to_string(&path)
            .map_err(|error| SchemaError::fetch(reference, format!("{}: {error}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|error| SchemaError::fetch(reference, format!("{}: {error}", path.display())))
    }
}
