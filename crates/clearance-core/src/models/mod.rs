//! Data models: configuration and declaration records.

pub mod config;
pub mod declaration;
