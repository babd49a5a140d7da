//! storico-core
//!
//! Traits and utilities shared across the storico ecosystem.
//!
//! - `store`: the `SeriesStore` and `MetadataStore` persistence contracts.
//! - `connector`: the `SourceConnector` trait and capability provider traits.
//! - `timeseries`: pure merge/normalization/windowing helpers over
//!   already-materialized series.
//!
//! Persistence and connector implementations live in sibling crates
//! (`storico-store`, `storico-fred`, `storico-mock`) and are injected into
//! the `storico` orchestrator; nothing in this crate touches the network or
//! the filesystem.
#![warn(missing_docs)]

/// Connector capability traits and the primary `SourceConnector` interface.
pub mod connector;
/// Persistence contracts for observations and per-series metadata.
pub mod store;
/// Pure time-series utilities: merging, scale normalization, range windows.
pub mod timeseries;

pub use connector::{ObservationsProvider, SeriesInfoProvider, SourceConnector};
pub use storico_types::*;
pub use store::{MetadataStore, SeriesStore};
pub use timeseries::merge::{merge_append, sort_dedup};
pub use timeseries::transform::{filter_by_range, normalize_from_window_start, normalize_to_scale};
