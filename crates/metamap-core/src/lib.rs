#![deny(unsafe_code)]

pub mod cancel;
pub mod fill;
pub mod pipeline;

pub use cancel::{CancelToken, Cancelled};
pub use fill::{FillError, FilledDocument, fill};
pub use pipeline::MappingPipeline;
