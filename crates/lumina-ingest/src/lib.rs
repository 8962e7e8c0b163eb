//! Image ingestion pipeline for lumina.
//!
//! Implements folder scanning, dedup filtering against the record
//! store, and the describe → embed → append ingest stage as a treadle
//! `Stage`. The vision-model and embedding collaborators sit behind
//! the [`Describer`] and [`lumina_core::embed::Embedder`] seams.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod describe;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod scan;
pub mod work_item;

pub use config::Config;
pub use describe::{Describer, HttpDescriber};
pub use error::{IngestError, IngestResult};
pub use filter::filter_existing;
pub use pipeline::{build_pipeline, IngestStage, IngestSummary};
pub use work_item::IngestJob;
