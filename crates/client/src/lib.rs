//! Contact Book client library.
//!
//! - [`api`] - The [`ContactApi`] seam and its `reqwest` implementation
//! - [`book`] - [`ContactBook`], the state behind the single form/list view
//!
//! The view never patches its list locally: every successful mutation is
//! followed by a fresh fetch of the whole list.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod book;
pub mod error;

pub use api::{ContactApi, HttpContactApi};
pub use book::{Confirm, ContactBook, ContactDraft};
pub use error::ClientError;
