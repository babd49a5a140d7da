use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-series bookkeeping maintained by the sync layer.
///
/// Mutated only after a successful write to the series store, never
/// speculatively. Fields start out unset for series that have never synced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Name of the remote source the data came from.
    pub source: Option<String>,
    /// Source-reported description of the series.
    pub description: Option<String>,
    /// Source-reported unit (e.g. "Index", "Percent").
    pub unit: Option<String>,
    /// When the series was last successfully synchronized.
    pub last_updated: Option<DateTime<Utc>>,
    /// Earliest stored observation date.
    pub data_start_date: Option<NaiveDate>,
    /// Latest stored observation date; the incremental-refresh baseline.
    pub data_end_date: Option<NaiveDate>,
}

impl SeriesMetadata {
    /// Merge a patch into this record. Fields the patch leaves unset are untouched.
    pub fn apply(&mut self, patch: MetadataPatch) {
        if let Some(source) = patch.source {
            self.source = Some(source);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(unit) = patch.unit {
            self.unit = Some(unit);
        }
        if let Some(last_updated) = patch.last_updated {
            self.last_updated = Some(last_updated);
        }
        if let Some(start) = patch.data_start_date {
            self.data_start_date = Some(start);
        }
        if let Some(end) = patch.data_end_date {
            self.data_end_date = Some(end);
        }
    }
}

/// Partial update for [`SeriesMetadata`]; only set fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPatch {
    /// New source name, if any.
    pub source: Option<String>,
    /// New description, if any.
    pub description: Option<String>,
    /// New unit, if any.
    pub unit: Option<String>,
    /// New last-updated timestamp, if any.
    pub last_updated: Option<DateTime<Utc>>,
    /// New earliest-date bound, if any.
    pub data_start_date: Option<NaiveDate>,
    /// New latest-date bound, if any.
    pub data_end_date: Option<NaiveDate>,
}

impl MetadataPatch {
    /// Start an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source name.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the unit.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the last-updated timestamp.
    #[must_use]
    pub const fn last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    /// Set both date-range bounds at once.
    #[must_use]
    pub const fn data_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.data_start_date = Some(start);
        self.data_end_date = Some(end);
        self
    }

    /// Set only the latest-date bound.
    #[must_use]
    pub const fn data_end_date(mut self, end: NaiveDate) -> Self {
        self.data_end_date = Some(end);
        self
    }

    /// Whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source.is_none()
            && self.description.is_none()
            && self.unit.is_none()
            && self.last_updated.is_none()
            && self.data_start_date.is_none()
            && self.data_end_date.is_none()
    }
}

/// Descriptive fields about a series as reported by the remote source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSeriesInfo {
    /// Source-reported title.
    pub title: Option<String>,
    /// Source-reported unit.
    pub unit: Option<String>,
    /// Source-reported long-form description.
    pub description: Option<String>,
}
