//! Contact Book Core - Shared types library.
//!
//! This crate provides the types used across all Contact Book components:
//! - `server` - REST API over the `contacts` table
//! - `client` - HTTP client and view state for the single-view UI
//! - `cli` - Command-line tools and the interactive terminal UI
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. The `postgres` feature adds sqlx encoding for ids.
//!
//! # Modules
//!
//! - [`types`] - The `Contact` entity, its typed id, and write payload validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
