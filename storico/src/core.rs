use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use storico_core::{
    MetadataStore, ObservationsProvider, SeriesCatalog, SeriesStore, SourceConnector, StoricoError,
    SyncConfig,
};

use crate::locks::SeriesLocks;

/// Orchestrator that keeps a local series cache in sync with one remote
/// source. Construct via [`Storico::builder`].
pub struct Storico {
    pub(crate) series_store: Arc<dyn SeriesStore>,
    pub(crate) metadata_store: Arc<dyn MetadataStore>,
    pub(crate) connector: Arc<dyn SourceConnector>,
    pub(crate) catalog: SeriesCatalog,
    pub(crate) cfg: SyncConfig,
    pub(crate) locks: SeriesLocks,
}

impl std::fmt::Debug for Storico {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storico")
            .field("catalog", &self.catalog)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Storico`] orchestrator.
#[derive(Default)]
pub struct StoricoBuilder {
    series_store: Option<Arc<dyn SeriesStore>>,
    metadata_store: Option<Arc<dyn MetadataStore>>,
    connector: Option<Arc<dyn SourceConnector>>,
    catalog: SeriesCatalog,
    cfg: SyncConfig,
}

impl StoricoBuilder {
    /// A builder with defaults: empty catalog, 5s source timeout, no overall
    /// request deadline, unbounded full-history start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the observation store (required).
    #[must_use]
    pub fn with_series_store(mut self, store: Arc<dyn SeriesStore>) -> Self {
        self.series_store = Some(store);
        self
    }

    /// Set the metadata store (required).
    #[must_use]
    pub fn with_metadata_store(mut self, store: Arc<dyn MetadataStore>) -> Self {
        self.metadata_store = Some(store);
        self
    }

    /// Set the remote-source connector (required).
    #[must_use]
    pub fn with_connector(mut self, connector: Arc<dyn SourceConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    /// Set the series catalog. Without one, every id is passed to the source
    /// verbatim and batch-refresh has nothing to iterate.
    #[must_use]
    pub fn with_catalog(mut self, catalog: SeriesCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Timeout for each individual connector call.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Overall deadline applied to every series within a batch fan-out.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Earliest date full refreshes and cache-miss fetches ask the source
    /// for. Unset means "everything the source has".
    #[must_use]
    pub const fn full_history_start(mut self, start: NaiveDate) -> Self {
        self.cfg.full_history_start = Some(start);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// `InvalidArg` if any of the three required components is missing.
    pub fn build(self) -> Result<Storico, StoricoError> {
        let missing = |what: &str| {
            StoricoError::InvalidArg(format!("no {what} configured; set one on the builder"))
        };
        Ok(Storico {
            series_store: self.series_store.ok_or_else(|| missing("series store"))?,
            metadata_store: self
                .metadata_store
                .ok_or_else(|| missing("metadata store"))?,
            connector: self.connector.ok_or_else(|| missing("connector"))?,
            catalog: self.catalog,
            cfg: self.cfg,
            locks: SeriesLocks::new(),
        })
    }
}

impl Storico {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> StoricoBuilder {
        StoricoBuilder::new()
    }

    /// The configured catalog.
    #[must_use]
    pub fn catalog(&self) -> &SeriesCatalog {
        &self.catalog
    }

    pub(crate) fn observations_provider(
        &self,
    ) -> Result<&dyn ObservationsProvider, StoricoError> {
        self.connector
            .as_observations_provider()
            .ok_or_else(|| StoricoError::unsupported("observations"))
    }

    /// Wrap a connector future with the configured source timeout, mapping
    /// elapse into the source-unavailable taxonomy.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "storico::core::source_call_with_timeout",
            skip(fut),
            fields(connector = connector_name, capability = capability),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, StoricoError>
    where
        Fut: core::future::Future<Output = Result<T, StoricoError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(StoricoError::source(
                connector_name,
                format!("{capability} timed out after {}ms", timeout.as_millis()),
            ))
        })
    }
}
