//! Error types for mapping operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("source attribute '{attribute}' is missing from a '{scope}' record")]
    MissingAttribute { attribute: String, scope: String },

    #[error("extension attribute '{attribute}' is not a sequence")]
    ExtensionNotSequence { attribute: String },

    #[error(
        "extension attribute '{attribute}' has {actual} elements where {expected} were expected"
    )]
    ExtensionLengthMismatch {
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "record {index} does not belong to the batch: identifier {divergent} diverges from {first}"
    )]
    InconsistentBatch {
        first: String,
        index: usize,
        divergent: String,
    },
}
