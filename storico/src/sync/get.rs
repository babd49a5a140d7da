use chrono::{NaiveDate, Utc};
use futures::future::join_all;

use storico_core::{
    MetadataPatch, Observation, RangeKey, SeriesBatch, StoricoError, WriteMode, filter_by_range,
    sort_dedup,
};

use crate::Storico;

impl Storico {
    /// Read a series, local-first.
    ///
    /// A cached series is served straight from the store; the source is not
    /// contacted, so reads work offline once synced. On a cache miss the
    /// full configured history is fetched, persisted, and returned. A miss
    /// where the source legitimately has no data yields an empty vector and
    /// writes nothing, so the next call asks again.
    ///
    /// # Errors
    /// Store errors pass through; on a miss, connector errors and
    /// `Unsupported` (connector cannot fetch observations) do too.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), err)
    )]
    pub async fn get_series(&self, series_id: &str) -> Result<Vec<Observation>, StoricoError> {
        self.get_series_window(series_id, None, None).await
    }

    /// Read a series local-first, bounded by an inclusive `[start, end]`
    /// date window (`None` = unbounded). On a cache miss the source is
    /// asked for the same window (an unbounded start falls back to the
    /// configured history start), and what it returns becomes the cached
    /// series.
    ///
    /// # Errors
    /// Same as [`Storico::get_series`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self), err)
    )]
    pub async fn get_series_window(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        let _guard = self.locks.acquire(series_id).await;
        self.get_series_locked(series_id, start, end).await
    }

    /// Read a series local-first, then clip it to a lookback window
    /// anchored at its own latest observation.
    ///
    /// # Errors
    /// Same as [`Storico::get_series`].
    pub async fn get_series_range(
        &self,
        series_id: &str,
        range: RangeKey,
    ) -> Result<Vec<Observation>, StoricoError> {
        let series = self.get_series(series_id).await?;
        Ok(filter_by_range(&series, range))
    }

    /// Resolve many series concurrently, isolating per-id failures.
    ///
    /// Each id goes through the same path as [`Storico::get_series`]. A
    /// failing id lands in the batch's failure map and never disturbs its
    /// siblings. When a request timeout is configured it bounds each
    /// series' end-to-end resolution; since the fan-out runs concurrently,
    /// it effectively bounds the whole batch.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, ids))
    )]
    pub async fn get_series_batch<I, S>(
        &self,
        ids: I,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> SeriesBatch
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = ids.into_iter().map(Into::into).map(|id| async move {
            let fetch = self.get_series_window(&id, start, end);
            let result = match self.cfg.request_timeout {
                Some(deadline) => match tokio::time::timeout(deadline, fetch).await {
                    Ok(result) => result,
                    Err(_) => Err(StoricoError::timeout(self.connector.name(), deadline)),
                },
                None => fetch.await,
            };
            (id, result)
        });

        let mut batch = SeriesBatch::new();
        for (id, result) in join_all(tasks).await {
            match result {
                Ok(series) => {
                    batch.series.insert(id, series);
                }
                Err(err) => {
                    batch.failures.insert(id, err);
                }
            }
        }
        batch
    }

    async fn get_series_locked(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Observation>, StoricoError> {
        if self.series_store.exists(series_id).await {
            return self.series_store.read(series_id, start, end).await;
        }

        let provider = self.observations_provider()?;
        let source_key = self.catalog.source_key_for(series_id);
        let fetched = Self::source_call_with_timeout(
            self.connector.name(),
            "observations",
            self.cfg.source_timeout,
            provider.fetch(source_key, start.or(self.cfg.full_history_start), end),
        )
        .await?;
        let fetched = sort_dedup(fetched);

        // Nothing came back: report the empty series but persist nothing,
        // so a later call retries instead of trusting a cached void.
        let (Some(first), Some(last)) = (fetched.first(), fetched.last()) else {
            return Ok(fetched);
        };
        let data_range = (first.date, last.date);

        self.series_store
            .write(series_id, &fetched, WriteMode::Replace)
            .await?;
        self.metadata_store
            .update(
                series_id,
                MetadataPatch::new()
                    .source(self.connector.name())
                    .last_updated(Utc::now())
                    .data_range(data_range.0, data_range.1),
            )
            .await?;
        Ok(fetched)
    }
}
