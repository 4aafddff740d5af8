//! Data models: extracted quotations and pipeline configuration.

pub mod config;
pub mod quotation;
