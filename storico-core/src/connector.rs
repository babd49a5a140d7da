use async_trait::async_trait;
use chrono::NaiveDate;

use storico_types::{Observation, SourceSeriesInfo, StoricoError};

/// Focused role trait for connectors that provide raw observations.
#[async_trait]
pub trait ObservationsProvider: Send + Sync {
    /// Fetch observations for a source-native series key, optionally bounded
    /// by an inclusive `[start, end]` date range (`None` = unbounded).
    ///
    /// Implementations must return observations sorted by date ascending with
    /// no duplicate dates, values converted from the source's numeric text,
    /// and the source's "missing" sentinel dropped entirely — a gap is an
    /// absent observation, never a zero.
    ///
    /// # Errors
    /// `SourceUnavailable` on transport/auth failure, `InvalidSeries` if the
    /// remote rejects the series key.
    async fn fetch(
        &self,
        series_key: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError>;
}

/// Focused role trait for connectors that can describe a series.
#[async_trait]
pub trait SeriesInfoProvider: Send + Sync {
    /// Fetch descriptive fields (title, unit, description) for a series key.
    ///
    /// # Errors
    /// Same taxonomy as [`ObservationsProvider::fetch`].
    async fn series_info(&self, series_key: &str) -> Result<SourceSeriesInfo, StoricoError>;
}

/// Main connector trait implemented by remote-source crates. Exposes
/// capability discovery so the orchestrator can degrade gracefully when a
/// source only implements part of the surface.
pub trait SourceConnector: Send + Sync {
    /// A stable identifier for this source (e.g. "storico-fred").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise observation-fetch capability by returning a usable trait
    /// object reference when supported.
    fn as_observations_provider(&self) -> Option<&dyn ObservationsProvider> {
        None
    }

    /// If implemented, returns a trait object for series descriptions.
    fn as_series_info_provider(&self) -> Option<&dyn SeriesInfoProvider> {
        None
    }
}
