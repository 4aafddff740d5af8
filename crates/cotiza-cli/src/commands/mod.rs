//! CLI subcommands.

pub mod batch;
pub mod companies;
pub mod config;
pub mod extract;
pub mod order;
