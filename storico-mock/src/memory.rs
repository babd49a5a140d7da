use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use storico_core::{
    MetadataPatch, MetadataStore, Observation, SeriesMetadata, SeriesStore, StoricoError,
    WriteMode,
};

fn locked<'a, T>(mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// In-memory [`SeriesStore`] for tests. Upholds the same invariants as the
/// file-backed store: one observation per date, ascending reads.
#[derive(Debug, Default)]
pub struct MemorySeriesStore {
    series: Mutex<BTreeMap<String, BTreeMap<NaiveDate, Decimal>>>,
}

impl MemorySeriesStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeriesStore for MemorySeriesStore {
    async fn read(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        let series = locked(&self.series);
        let Some(by_date) = series.get(series_id) else {
            return Err(StoricoError::not_found(format!("series {series_id}")));
        };
        Ok(by_date
            .iter()
            .filter(|(date, _)| {
                start.is_none_or(|s| **date >= s) && end.is_none_or(|e| **date <= e)
            })
            .map(|(date, value)| Observation::new(*date, *value))
            .collect())
    }

    async fn write(
        &self,
        series_id: &str,
        observations: &[Observation],
        mode: WriteMode,
    ) -> Result<usize, StoricoError> {
        let mut series = locked(&self.series);
        let by_date = series.entry(series_id.to_owned()).or_default();
        if mode == WriteMode::Replace {
            by_date.clear();
        }
        for obs in observations {
            by_date.insert(obs.date, obs.value);
        }
        Ok(by_date.len())
    }

    async fn exists(&self, series_id: &str) -> bool {
        locked(&self.series).contains_key(series_id)
    }

    async fn date_range(&self, series_id: &str) -> Result<(NaiveDate, NaiveDate), StoricoError> {
        let series = locked(&self.series);
        let by_date = series
            .get(series_id)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| StoricoError::not_found(format!("series {series_id}")))?;
        let first = *by_date.keys().next().unwrap_or(&NaiveDate::MIN);
        let last = *by_date.keys().next_back().unwrap_or(&NaiveDate::MIN);
        Ok((first, last))
    }
}

/// In-memory [`MetadataStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: Mutex<BTreeMap<String, SeriesMetadata>>,
}

impl MemoryMetadataStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get(&self, series_id: &str) -> Result<SeriesMetadata, StoricoError> {
        locked(&self.records)
            .get(series_id)
            .cloned()
            .ok_or_else(|| StoricoError::not_found(format!("metadata for series {series_id}")))
    }

    async fn update(&self, series_id: &str, patch: MetadataPatch) -> Result<(), StoricoError> {
        locked(&self.records)
            .entry(series_id.to_owned())
            .or_default()
            .apply(patch);
        Ok(())
    }

    async fn get_all(&self) -> Result<BTreeMap<String, SeriesMetadata>, StoricoError> {
        Ok(locked(&self.records).clone())
    }
}
