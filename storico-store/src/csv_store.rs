use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use storico_core::{
    Observation, SeriesStore, StoricoError, WriteMode, merge_append, sort_dedup,
};

const HEADER_DATE: &str = "date";
const HEADER_VALUE: &str = "value";

/// A [`SeriesStore`] that keeps one CSV file per series.
///
/// Layout under the data directory is flat: series `SP500` lives in
/// `SP500.csv` with a `date,value` header, dates formatted `YYYY-MM-DD`
/// ascending and values as plain decimals. The files are meant to be
/// greppable and diffable; the format carries no store-private framing.
///
/// Every read re-validates the ordering invariant and reports `Corrupt`
/// on violation instead of repairing, so external edits that break a file
/// are caught at the first touch.
#[derive(Debug, Clone)]
pub struct CsvSeriesStore {
    root: PathBuf,
}

impl CsvSeriesStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store reads and writes.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn series_path(&self, series_id: &str) -> Result<PathBuf, StoricoError> {
        let stem = crate::checked_file_stem(series_id)?;
        Ok(self.root.join(format!("{stem}.csv")))
    }

    fn read_all(&self, series_id: &str, path: &Path) -> Result<Vec<Observation>, StoricoError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| StoricoError::storage(series_id, e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| StoricoError::corrupt(series_id, e.to_string()))?;
        if headers.len() < 2 || &headers[0] != HEADER_DATE || &headers[1] != HEADER_VALUE {
            return Err(StoricoError::corrupt(
                series_id,
                format!("unexpected header '{}'", headers.iter().collect::<Vec<_>>().join(",")),
            ));
        }

        let mut observations = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| StoricoError::corrupt(series_id, e.to_string()))?;
            let line = row + 2; // 1-based, after the header
            let date = record
                .get(0)
                .and_then(|s| NaiveDate::from_str(s).ok())
                .ok_or_else(|| {
                    StoricoError::corrupt(series_id, format!("unparsable date at line {line}"))
                })?;
            let value = record
                .get(1)
                .and_then(|s| Decimal::from_str(s).ok())
                .ok_or_else(|| {
                    StoricoError::corrupt(series_id, format!("unparsable value at line {line}"))
                })?;
            if let Some(prev) = observations.last().map(|o: &Observation| o.date)
                && prev >= date
            {
                return Err(StoricoError::corrupt(
                    series_id,
                    format!("dates not strictly increasing at line {line} ({prev} then {date})"),
                ));
            }
            observations.push(Observation::new(date, value));
        }
        Ok(observations)
    }

    /// Write the canonical observation set, then atomically publish it.
    fn publish(
        &self,
        series_id: &str,
        path: &Path,
        observations: &[Observation],
    ) -> Result<(), StoricoError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StoricoError::storage(series_id, e.to_string()))?;

        let tmp = self.root.join(format!("{series_id}.csv.tmp"));
        let io_err = |e: &dyn std::fmt::Display| StoricoError::storage(series_id, e.to_string());

        {
            let mut writer = csv::Writer::from_path(&tmp).map_err(|e| io_err(&e))?;
            writer
                .write_record([HEADER_DATE, HEADER_VALUE])
                .map_err(|e| io_err(&e))?;
            for obs in observations {
                writer
                    .write_record([obs.date.to_string(), obs.value.to_string()])
                    .map_err(|e| io_err(&e))?;
            }
            writer.flush().map_err(|e| io_err(&e))?;
        }

        fs::rename(&tmp, path).map_err(|e| io_err(&e))
    }
}

#[async_trait]
impl SeriesStore for CsvSeriesStore {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), err)
    )]
    async fn read(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        let path = self.series_path(series_id)?;
        if !path.is_file() {
            return Err(StoricoError::not_found(format!("series {series_id}")));
        }
        let mut observations = self.read_all(series_id, &path)?;
        observations.retain(|obs| {
            start.is_none_or(|s| obs.date >= s) && end.is_none_or(|e| obs.date <= e)
        });
        Ok(observations)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, observations), fields(n = observations.len()), err)
    )]
    async fn write(
        &self,
        series_id: &str,
        observations: &[Observation],
        mode: WriteMode,
    ) -> Result<usize, StoricoError> {
        let path = self.series_path(series_id)?;
        let canonical = match mode {
            WriteMode::Replace => sort_dedup(observations.to_vec()),
            WriteMode::Append => {
                let existing = if path.is_file() {
                    self.read_all(series_id, &path)?
                } else {
                    Vec::new()
                };
                merge_append(existing, observations.to_vec())
            }
        };
        self.publish(series_id, &path, &canonical)?;
        Ok(canonical.len())
    }

    async fn exists(&self, series_id: &str) -> bool {
        self.series_path(series_id)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    async fn date_range(&self, series_id: &str) -> Result<(NaiveDate, NaiveDate), StoricoError> {
        let observations = self.read(series_id, None, None).await?;
        match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => Ok((first.date, last.date)),
            _ => Err(StoricoError::not_found(format!(
                "series {series_id} has no observations"
            ))),
        }
    }
}
