//! Storico-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod metadata;
mod observation;
mod range;
mod reports;

pub use catalog::{SeriesCatalog, SeriesDescriptor};
pub use config::{RefreshMode, SyncConfig, WriteMode};
pub use error::StoricoError;
pub use metadata::{MetadataPatch, SeriesMetadata, SourceSeriesInfo};
pub use observation::Observation;
pub use range::RangeKey;
pub use reports::{RefreshOutcome, RefreshReport, SeriesBatch};
