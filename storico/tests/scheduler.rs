use std::sync::Arc;

use async_trait::async_trait;
use storico::{ManualTrigger, RefreshMode, RefreshTrigger, SeriesStore, Storico};
use storico_mock::{MemoryMetadataStore, MemorySeriesStore, MockConnector};

fn storico_for(catalog_json: &str) -> (Storico, Arc<MemorySeriesStore>) {
    let series_store = Arc::new(MemorySeriesStore::new());
    let storico = Storico::builder()
        .with_series_store(series_store.clone())
        .with_metadata_store(Arc::new(MemoryMetadataStore::new()))
        .with_connector(Arc::new(MockConnector::new()))
        .with_catalog(storico::SeriesCatalog::from_json_str(catalog_json).unwrap())
        .build()
        .unwrap();
    (storico, series_store)
}

const CATALOG: &str = r##"{ "series": [
    { "id": "SP500", "displayName": "S&P 500", "sourceName": "mock",
      "sourceNativeKey": "SP500", "category": "markets", "colorHint": "#1f77b4" }
] }"##;

#[tokio::test]
async fn manual_trigger_never_fires() {
    let (storico, series_store) = storico_for(CATALOG);
    let cycles = storico.run_scheduled(&mut ManualTrigger).await;
    assert_eq!(cycles, 0);
    assert!(!series_store.exists("SP500").await);
}

#[tokio::test]
async fn a_finite_trigger_drives_that_many_cycles() {
    struct CountedTrigger(usize);

    #[async_trait]
    impl RefreshTrigger for CountedTrigger {
        async fn next_mode(&mut self) -> Option<RefreshMode> {
            if self.0 == 0 {
                return None;
            }
            self.0 -= 1;
            Some(RefreshMode::Full)
        }
    }

    let (storico, series_store) = storico_for(CATALOG);
    let cycles = storico.run_scheduled(&mut CountedTrigger(3)).await;
    assert_eq!(cycles, 3);
    assert!(series_store.exists("SP500").await);
}
