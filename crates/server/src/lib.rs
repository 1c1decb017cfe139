//! Contact Book API server library.
//!
//! This crate provides the REST API as a library, so the router can be
//! driven in-process by tests and the schema bootstrap reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
