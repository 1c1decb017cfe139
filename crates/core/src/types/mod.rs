//! Core types for Contact Book.

pub mod contact;
pub mod id;

pub use contact::{Contact, ContactField, ContactFields, ContactInput, ValidationError};
pub use id::*;
