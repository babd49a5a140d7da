use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use storico_types::{MetadataPatch, Observation, SeriesMetadata, StoricoError, WriteMode};

/// Persistence contract for ordered time series.
///
/// A stored series holds at most one observation per date, dates strictly
/// increasing. Implementations verify that invariant on every read and
/// surface `Corrupt` rather than repairing silently.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Read a series, optionally bounded by an inclusive `[start, end]` range
    /// (`None` = unbounded in that direction).
    ///
    /// Returns an empty vector (not an error) when the range excludes every
    /// stored point.
    ///
    /// # Errors
    /// `NotFound` if the series has never been written; `Corrupt` if the
    /// stored data fails invariant checks.
    async fn read(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError>;

    /// Write observations, returning the count now stored for the series.
    ///
    /// `Replace` discards existing data and stores exactly the given
    /// observations (deduplicated by date, sorted ascending, last-given wins
    /// on exact duplicates). `Append` merges into the existing set with the
    /// new value winning on date collisions. The write must be atomic with
    /// respect to a crash mid-write: a partial write must never leave a
    /// torn or partially-ordered series visible to a subsequent read.
    ///
    /// # Errors
    /// `Storage` on I/O failure; `Corrupt` if an append has to read back an
    /// invalid existing series.
    async fn write(
        &self,
        series_id: &str,
        observations: &[Observation],
        mode: WriteMode,
    ) -> Result<usize, StoricoError>;

    /// Whether the series has ever been written.
    async fn exists(&self, series_id: &str) -> bool;

    /// Earliest and latest stored observation dates.
    ///
    /// # Errors
    /// `NotFound` if the series is absent or empty.
    async fn date_range(&self, series_id: &str) -> Result<(NaiveDate, NaiveDate), StoricoError>;
}

/// Persistence contract for per-series bookkeeping records.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Metadata for one series.
    ///
    /// # Errors
    /// `NotFound` if metadata was never set for the id.
    async fn get(&self, series_id: &str) -> Result<SeriesMetadata, StoricoError>;

    /// Merge a patch into the series' metadata, creating the record if
    /// absent. Fields the patch leaves unset are untouched.
    ///
    /// # Errors
    /// `Storage` on I/O failure.
    async fn update(&self, series_id: &str, patch: MetadataPatch) -> Result<(), StoricoError>;

    /// All metadata records, keyed by series id.
    ///
    /// # Errors
    /// `Storage` on I/O failure.
    async fn get_all(&self) -> Result<BTreeMap<String, SeriesMetadata>, StoricoError>;
}
