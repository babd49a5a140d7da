//! Report envelopes produced by the sync orchestrator.
//!
//! Batch operations are best-effort across series: one id's failure never
//! aborts or rolls back its siblings, so results and failures travel
//! side by side, keyed by series id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoricoError;
use crate::observation::Observation;

/// Result of a batch `get`: per-id observation vectors alongside per-id failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBatch {
    /// Successfully resolved series, keyed by id.
    pub series: BTreeMap<String, Vec<Observation>>,
    /// Per-id failures; ids present here are absent from `series`.
    pub failures: BTreeMap<String, StoricoError>,
}

impl SeriesBatch {
    /// Empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observations for one id, if it succeeded.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[Observation]> {
        self.series.get(id).map(Vec::as_slice)
    }

    /// Whether every requested id resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a successful per-series refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshOutcome {
    /// Observations written or merged. Zero means the source had nothing new,
    /// which is still a completed, non-failing refresh.
    pub records_added: usize,
}

/// Result of a batch `refresh`: per-id outcomes alongside per-id failures.
///
/// A failed series keeps its last-known-good cached data; the failure here
/// tells the caller to surface the error next to that stale data rather
/// than blanking it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Per-id refresh outcomes for series that succeeded.
    pub outcomes: BTreeMap<String, RefreshOutcome>,
    /// Per-id failures; ids present here are absent from `outcomes`.
    pub failures: BTreeMap<String, StoricoError>,
}

impl RefreshReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given id refreshed successfully.
    #[must_use]
    pub fn succeeded(&self, id: &str) -> bool {
        self.outcomes.contains_key(id)
    }

    /// Total records added across all successful series.
    #[must_use]
    pub fn records_added_total(&self) -> usize {
        self.outcomes.values().map(|o| o.records_added).sum()
    }

    /// Whether every requested id refreshed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
