#![deny(unsafe_code)]

pub mod cache;
pub mod error;
pub mod skeleton;

pub use cache::{SchemaBody, SchemaCache, SchemaSource};
pub use error::SchemaError;
pub use skeleton::{SchemaNode, SchemaSkeleton, build_skeleton};
