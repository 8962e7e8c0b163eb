//! Core domain model for lumina.
//!
//! This crate defines the image record model, the flat JSON record
//! store, and the embedding collaborator seam shared by the ingest
//! pipeline and the search engine.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod embed;
pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::ImageRecord;
pub use store::JsonStore;
