//! CLI library components for metamap.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
