use chrono::{Days, Utc};
use futures::future::join_all;

use storico_core::{
    MetadataPatch, RefreshMode, RefreshOutcome, RefreshReport, SourceSeriesInfo, StoricoError,
    WriteMode, sort_dedup,
};

use crate::Storico;

impl Storico {
    /// Pull a series from the source and update the cache.
    ///
    /// `Full` re-fetches the whole configured history and replaces whatever
    /// is cached; the fresh pull supersedes the old data even when it is
    /// shorter, because the source may have revised history away. A full
    /// pull that comes back empty leaves the existing cache untouched.
    ///
    /// `Incremental` asks only for dates after the recorded `data_end_date`
    /// (exclusive) up to today and merges the answer in. Zero new rows is a
    /// completed refresh with `records_added` 0. A series with no recorded
    /// end date has never fully synced and fails with `MissingBaseline`.
    ///
    /// Metadata is touched only after the series write has succeeded.
    ///
    /// # Errors
    /// `MissingBaseline` as above; connector and store errors pass through.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self), err)
    )]
    pub async fn refresh_series(
        &self,
        series_id: &str,
        mode: RefreshMode,
    ) -> Result<RefreshOutcome, StoricoError> {
        let _guard = self.locks.acquire(series_id).await;
        match mode {
            RefreshMode::Full => self.refresh_full(series_id).await,
            RefreshMode::Incremental => self.refresh_incremental(series_id).await,
        }
    }

    /// Refresh every catalog series concurrently, isolating per-id failures.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(self)))]
    pub async fn refresh_all(&self, mode: RefreshMode) -> RefreshReport {
        let ids: Vec<String> = self.catalog.ids().map(str::to_owned).collect();
        self.refresh_batch(ids, mode).await
    }

    /// Refresh the given series concurrently, isolating per-id failures.
    ///
    /// A failed series keeps its last-known-good cache; its error lands in
    /// the report's failure map. The configured request timeout, if any,
    /// bounds each series' refresh.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, ids))
    )]
    pub async fn refresh_batch<I, S>(&self, ids: I, mode: RefreshMode) -> RefreshReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = ids.into_iter().map(Into::into).map(|id| async move {
            let result = match self.cfg.request_timeout {
                Some(deadline) => {
                    match tokio::time::timeout(deadline, self.refresh_series(&id, mode)).await {
                        Ok(result) => result,
                        Err(_) => Err(StoricoError::timeout(self.connector.name(), deadline)),
                    }
                }
                None => self.refresh_series(&id, mode).await,
            };
            (id, result)
        });

        let mut report = RefreshReport::new();
        for (id, result) in join_all(tasks).await {
            match result {
                Ok(outcome) => {
                    report.outcomes.insert(id, outcome);
                }
                Err(err) => {
                    report.failures.insert(id, err);
                }
            }
        }
        report
    }

    async fn refresh_full(&self, series_id: &str) -> Result<RefreshOutcome, StoricoError> {
        let provider = self.observations_provider()?;
        let source_key = self.catalog.source_key_for(series_id);
        let fetched = Self::source_call_with_timeout(
            self.connector.name(),
            "observations",
            self.cfg.source_timeout,
            provider.fetch(source_key, self.cfg.full_history_start, None),
        )
        .await?;
        let fetched = sort_dedup(fetched);
        let now = Utc::now();

        let (Some(first), Some(last)) = (fetched.first(), fetched.last()) else {
            self.metadata_store
                .update(
                    series_id,
                    MetadataPatch::new()
                        .source(self.connector.name())
                        .last_updated(now),
                )
                .await?;
            return Ok(RefreshOutcome::default());
        };
        let data_range = (first.date, last.date);

        let records_added = self
            .series_store
            .write(series_id, &fetched, WriteMode::Replace)
            .await?;

        let mut patch = MetadataPatch::new()
            .source(self.connector.name())
            .last_updated(now)
            .data_range(data_range.0, data_range.1);
        if let Some(info) = self.fetch_series_info(source_key).await {
            if let Some(description) = info.description.or(info.title) {
                patch = patch.description(description);
            }
            if let Some(unit) = info.unit {
                patch = patch.unit(unit);
            }
        }
        self.metadata_store.update(series_id, patch).await?;

        Ok(RefreshOutcome { records_added })
    }

    async fn refresh_incremental(&self, series_id: &str) -> Result<RefreshOutcome, StoricoError> {
        let provider = self.observations_provider()?;
        let metadata = match self.metadata_store.get(series_id).await {
            Ok(metadata) => metadata,
            Err(StoricoError::NotFound { .. }) => {
                return Err(StoricoError::missing_baseline(series_id));
            }
            Err(err) => return Err(err),
        };
        let data_end = metadata
            .data_end_date
            .ok_or_else(|| StoricoError::missing_baseline(series_id))?;

        let fetch_start = data_end + Days::new(1);
        let today = Utc::now().date_naive();
        let now = Utc::now();

        let fetched = if fetch_start > today {
            Vec::new()
        } else {
            let source_key = self.catalog.source_key_for(series_id);
            let fetched = Self::source_call_with_timeout(
                self.connector.name(),
                "observations",
                self.cfg.source_timeout,
                provider.fetch(source_key, Some(fetch_start), Some(today)),
            )
            .await?;
            sort_dedup(fetched)
        };

        if fetched.is_empty() {
            // The source had nothing new. Still a successful check.
            self.metadata_store
                .update(series_id, MetadataPatch::new().last_updated(now))
                .await?;
            return Ok(RefreshOutcome::default());
        }

        self.series_store
            .write(series_id, &fetched, WriteMode::Append)
            .await?;
        let (start, end) = self.series_store.date_range(series_id).await?;
        self.metadata_store
            .update(
                series_id,
                MetadataPatch::new()
                    .source(self.connector.name())
                    .last_updated(now)
                    .data_range(start, end),
            )
            .await?;

        Ok(RefreshOutcome {
            records_added: fetched.len(),
        })
    }

    /// Best-effort descriptive fields from the source. Absence of the
    /// capability, or a failure fetching, degrades to `None`; a refresh
    /// never fails over decoration.
    async fn fetch_series_info(&self, source_key: &str) -> Option<SourceSeriesInfo> {
        let provider = self.connector.as_series_info_provider()?;
        Self::source_call_with_timeout(
            self.connector.name(),
            "series_info",
            self.cfg.source_timeout,
            provider.series_info(source_key),
        )
        .await
        .ok()
    }
}
