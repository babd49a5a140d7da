//! storico
//!
//! Local-first synchronization and caching layer for macro-economic time
//! series. A [`Storico`] instance owns a [`SeriesStore`] for observations,
//! a [`MetadataStore`] for per-series bookkeeping, and one
//! [`SourceConnector`] for the remote source, and keeps the local cache
//! the single source of truth for readers:
//!
//! - `get_series` serves from the store and falls back to a full fetch
//!   only when the series has never been cached.
//! - `refresh_series` pulls from the source, either the full configured
//!   history or just the dates after the last known point.
//! - Batch variants fan out concurrently and isolate per-series failures,
//!   so one broken series never blanks the rest of a dashboard.
//!
//! Pure transforms (rebasing to 100, lookback windows) are re-exported
//! from `storico-core` and operate on whatever the above return.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), storico::StoricoError> {
//! use std::sync::Arc;
//! use storico::{RangeKey, Storico, filter_by_range};
//! use storico_fred::FredConnector;
//! use storico_store::{CsvSeriesStore, JsonMetadataStore};
//!
//! let fred = FredConnector::builder()
//!     .api_key(std::env::var("FRED_API_KEY").unwrap())
//!     .build()?;
//!
//! let storico = Storico::builder()
//!     .with_series_store(Arc::new(CsvSeriesStore::new("data/series")))
//!     .with_metadata_store(Arc::new(JsonMetadataStore::new("data/metadata.json")))
//!     .with_connector(Arc::new(fred))
//!     .build()?;
//!
//! let sp500 = storico.get_series("SP500").await?;
//! let last_year = filter_by_range(&sp500, RangeKey::Y1);
//! # let _ = last_year;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod core;
mod locks;
/// Pluggable refresh scheduling.
pub mod scheduler;
mod sync;

pub use core::{Storico, StoricoBuilder};
pub use scheduler::{IntervalTrigger, ManualTrigger, RefreshTrigger};
pub use storico_core::*;
