//! Configuration types shared by the orchestrator and stores.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a refresh obtains new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshMode {
    /// Discard and re-fetch the series' entire tracked range. Destructive:
    /// supersedes everything previously cached for the series.
    Full,
    /// Fetch only dates after the last known data point, then merge.
    /// Requires a prior full sync as baseline.
    #[default]
    Incremental,
}

/// How a series-store write treats existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    /// Discard any existing data and store exactly the given observations
    /// (deduplicated by date, sorted ascending).
    Replace,
    /// Merge into the existing set; on date collisions the new value wins
    /// because the source is authoritative.
    Append,
}

/// Global configuration for the [`Storico`](https://docs.rs/storico) orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Timeout for an individual connector call. The connector is the only
    /// network-bound step; on elapse the per-series operation fails with
    /// `SourceUnavailable` instead of hanging the batch.
    pub source_timeout: Duration,
    /// Optional overall deadline for a multi-series fan-out.
    pub request_timeout: Option<Duration>,
    /// Start of the configured full-history range for full refreshes.
    /// `None` asks the source for everything it has.
    pub full_history_start: Option<NaiveDate>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(5),
            request_timeout: None,
            full_history_start: None,
        }
    }
}
