//! storico-mock
//!
//! Deterministic connectors and in-memory stores for tests and CI-safe
//! examples. Nothing here touches the network or the filesystem.
//!
//! Reserved fixture keys on [`MockConnector`]:
//! - `"FAIL"`: every call fails with a source error.
//! - `"TIMEOUT"`: calls sleep ~200ms before answering, so an orchestrator
//!   with a shorter deadline will give up first.
//! - `"EMPTY"`: fetches succeed with zero observations.
//! - `"GAPPY"`: a dense series with every fifth date absent.
#![warn(missing_docs)]

mod fixtures;
mod memory;
mod recording;

pub use fixtures::{FIXTURE_LEN, FIXTURE_START};
pub use memory::{MemoryMetadataStore, MemorySeriesStore};
pub use recording::{FetchWindow, RecordingConnector};

use async_trait::async_trait;
use chrono::NaiveDate;

use storico_core::{
    Observation, ObservationsProvider, SeriesInfoProvider, SourceConnector, SourceSeriesInfo,
    StoricoError,
};

/// Connector serving deterministic fixture series.
#[derive(Debug, Default)]
pub struct MockConnector;

impl MockConnector {
    /// A new fixture-backed connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn gate(&self, series_key: &str, capability: &str) -> Result<(), StoricoError> {
        match series_key {
            "FAIL" => Err(StoricoError::source(
                self.name(),
                format!("forced failure: {capability}"),
            )),
            // Long enough that a sub-200ms orchestrator deadline fires first,
            // short enough not to drag the suite.
            "TIMEOUT" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl SourceConnector for MockConnector {
    fn name(&self) -> &'static str {
        "storico-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_observations_provider(&self) -> Option<&dyn ObservationsProvider> {
        Some(self)
    }

    fn as_series_info_provider(&self) -> Option<&dyn SeriesInfoProvider> {
        Some(self)
    }
}

#[async_trait]
impl ObservationsProvider for MockConnector {
    async fn fetch(
        &self,
        series_key: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        self.gate(series_key, "observations").await?;
        if series_key == "EMPTY" {
            return Ok(Vec::new());
        }
        let mut observations = fixtures::observations(series_key)
            .ok_or_else(|| StoricoError::invalid_series(self.name(), series_key))?;
        observations.retain(|obs| {
            start.is_none_or(|s| obs.date >= s) && end.is_none_or(|e| obs.date <= e)
        });
        Ok(observations)
    }
}

#[async_trait]
impl SeriesInfoProvider for MockConnector {
    async fn series_info(&self, series_key: &str) -> Result<SourceSeriesInfo, StoricoError> {
        self.gate(series_key, "series_info").await?;
        if series_key == "EMPTY" {
            return Ok(SourceSeriesInfo::default());
        }
        fixtures::info(series_key)
            .ok_or_else(|| StoricoError::invalid_series(self.name(), series_key))
    }
}
