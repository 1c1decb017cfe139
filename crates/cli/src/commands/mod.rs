//! CLI subcommand implementations.

pub mod contacts;
pub mod migrate;
