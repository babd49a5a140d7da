use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use storico_core::{
    Observation, ObservationsProvider, SourceConnector, StoricoError, sort_dedup,
};

/// One fetch call as seen by a [`RecordingConnector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWindow {
    /// The source-native key requested.
    pub series_key: String,
    /// Requested inclusive start bound.
    pub start: Option<NaiveDate>,
    /// Requested inclusive end bound.
    pub end: Option<NaiveDate>,
}

/// Connector with caller-programmed responses that records every fetch
/// window it receives.
///
/// Useful for asserting what a sync actually asked the source for, e.g.
/// that an incremental refresh starts the day after the stored end date.
/// Deliberately does NOT advertise the series-info capability, which also
/// makes it the fixture for graceful-degradation paths.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    canned: HashMap<String, Vec<Observation>>,
    windows: Mutex<Vec<FetchWindow>>,
}

impl RecordingConnector {
    /// An empty connector; every fetch is `InvalidSeries` until programmed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Program the full observation set for a key. Fetches return the
    /// subset inside the requested window, canonicalized.
    #[must_use]
    pub fn with_series(mut self, series_key: impl Into<String>, observations: Vec<Observation>) -> Self {
        self.canned.insert(series_key.into(), sort_dedup(observations));
        self
    }

    /// Every fetch window recorded so far, in call order.
    pub fn windows(&self) -> Vec<FetchWindow> {
        self.windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl SourceConnector for RecordingConnector {
    fn name(&self) -> &'static str {
        "storico-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_observations_provider(&self) -> Option<&dyn ObservationsProvider> {
        Some(self)
    }
}

#[async_trait]
impl ObservationsProvider for RecordingConnector {
    async fn fetch(
        &self,
        series_key: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        self.windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(FetchWindow {
                series_key: series_key.to_owned(),
                start,
                end,
            });

        let Some(all) = self.canned.get(series_key) else {
            return Err(StoricoError::invalid_series(self.name(), series_key));
        };
        Ok(all
            .iter()
            .filter(|obs| {
                start.is_none_or(|s| obs.date >= s) && end.is_none_or(|e| obs.date <= e)
            })
            .copied()
            .collect())
    }
}
