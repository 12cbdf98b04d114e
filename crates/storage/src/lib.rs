//! Content storage for radeck.
//!
//! This crate provides a trait-based content source with a JSON manifest
//! reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod manifest;
pub mod json_storage;

pub use trait_::{ContentStorage, StorageError, Result};
pub use manifest::{DeckManifest, ContentWarning};
pub use json_storage::JsonStorage;
