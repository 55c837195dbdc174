#![deny(unsafe_code)]

use metamap_model::SchemaRef;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to retrieve schema {reference}: {message}")]
    Fetch { reference: SchemaRef, message: String },

    #[error("mapping specification declares no schema reference")]
    MissingReference,

    #[error("schema {reference} is not cached")]
    NotCached { reference: SchemaRef },

    #[error("malformed schema: {detail}")]
    MalformedSchema { detail: String },
}

impl SchemaError {
    pub fn fetch(reference: &SchemaRef, message: impl std::fmt::Display) -> Self {
        Self::Fetch {
            reference: reference.clone(),
            message: message.to_string(),
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedSchema {
            detail: detail.into(),
        }
    }
}
