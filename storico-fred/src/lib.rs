//! storico-fred
//!
//! Source connector that implements [`SourceConnector`] against the FRED
//! (Federal Reserve Economic Data) HTTP API. Advertises both capabilities:
//! observation fetches and series descriptions.
//!
//! The connector normalizes FRED's quirks at the boundary so nothing
//! downstream has to know about them: the `"."` missing-value sentinel is
//! dropped (a gap is an absent observation, never a zero), rows that fail
//! to parse are skipped, and the result is always sorted ascending with no
//! duplicate dates.
#![warn(missing_docs)]

mod builder;
mod wire;

pub use builder::FredBuilder;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use storico_core::{
    Observation, ObservationsProvider, SeriesInfoProvider, SourceConnector, SourceSeriesInfo,
    StoricoError, sort_dedup,
};

use wire::{MISSING_VALUE, ObservationsResponse, SeriesResponse};

/// Production FRED API root.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Connector backed by the FRED HTTP API.
///
/// Construct via [`FredConnector::builder`]; an API key is required (free
/// registration at the St. Louis Fed).
#[derive(Debug, Clone)]
pub struct FredConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl FredConnector {
    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> FredBuilder {
        FredBuilder::new()
    }

    pub(crate) fn from_parts(
        client: reqwest::Client,
        base_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        series_key: &str,
        query: &[(&str, &str)],
    ) -> Result<T, StoricoError> {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_key),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| StoricoError::source(self.name(), e.to_string())),
            // FRED answers 400 for an unknown or malformed series id.
            StatusCode::BAD_REQUEST => {
                Err(StoricoError::invalid_series(self.name(), series_key))
            }
            status => Err(StoricoError::source(
                self.name(),
                format!("http status {status} from {path}"),
            )),
        }
    }

    fn transport_error(&self, error: &reqwest::Error) -> StoricoError {
        match (error.is_timeout(), self.timeout) {
            (true, Some(after)) => StoricoError::timeout(self.name(), after),
            _ => StoricoError::source(self.name(), error.to_string()),
        }
    }
}

impl SourceConnector for FredConnector {
    fn name(&self) -> &'static str {
        "storico-fred"
    }

    fn vendor(&self) -> &'static str {
        "Federal Reserve Bank of St. Louis"
    }

    fn as_observations_provider(&self) -> Option<&dyn ObservationsProvider> {
        Some(self)
    }

    fn as_series_info_provider(&self) -> Option<&dyn SeriesInfoProvider> {
        Some(self)
    }
}

#[async_trait]
impl ObservationsProvider for FredConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), err)
    )]
    async fn fetch(
        &self,
        series_key: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        let start = start.map(|d| d.to_string());
        let end = end.map(|d| d.to_string());
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(start) = start.as_deref() {
            query.push(("observation_start", start));
        }
        if let Some(end) = end.as_deref() {
            query.push(("observation_end", end));
        }

        let body: ObservationsResponse = self
            .get_json("series/observations", series_key, &query)
            .await?;

        let observations = body
            .observations
            .into_iter()
            .filter(|row| !row.value.is_empty() && row.value != MISSING_VALUE)
            .filter_map(|row| {
                let date = NaiveDate::from_str(&row.date).ok()?;
                let value = Decimal::from_str(&row.value).ok()?;
                Some(Observation::new(date, value))
            })
            .collect();
        Ok(sort_dedup(observations))
    }
}

#[async_trait]
impl SeriesInfoProvider for FredConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), err)
    )]
    async fn series_info(&self, series_key: &str) -> Result<SourceSeriesInfo, StoricoError> {
        let body: SeriesResponse = self.get_json("series", series_key, &[]).await?;
        let series = body
            .seriess
            .into_iter()
            .next()
            .ok_or_else(|| StoricoError::invalid_series(self.name(), series_key))?;
        Ok(SourceSeriesInfo {
            title: series.title,
            unit: series.units,
            description: series.notes,
        })
    }
}
