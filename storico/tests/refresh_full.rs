use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use storico::{
    MetadataStore, Observation, RefreshMode, SeriesStore, Storico, WriteMode,
};
use storico_mock::{
    FIXTURE_LEN, FIXTURE_START, MemoryMetadataStore, MemorySeriesStore, MockConnector,
    RecordingConnector,
};

fn obs(date: NaiveDate, v: i64) -> Observation {
    Observation::new(date, Decimal::from(v))
}

fn storico_with(
    connector: Arc<dyn storico::SourceConnector>,
) -> (Storico, Arc<MemorySeriesStore>, Arc<MemoryMetadataStore>) {
    let series_store = Arc::new(MemorySeriesStore::new());
    let metadata_store = Arc::new(MemoryMetadataStore::new());
    let storico = Storico::builder()
        .with_series_store(series_store.clone())
        .with_metadata_store(metadata_store.clone())
        .with_connector(connector)
        .build()
        .unwrap();
    (storico, series_store, metadata_store)
}

#[tokio::test]
async fn full_refresh_writes_everything_and_decorates_metadata() {
    let (storico, series_store, metadata_store) = storico_with(Arc::new(MockConnector::new()));

    let outcome = storico
        .refresh_series("SP500", RefreshMode::Full)
        .await
        .unwrap();
    assert_eq!(outcome.records_added, FIXTURE_LEN as usize);

    let stored = series_store.read("SP500", None, None).await.unwrap();
    assert_eq!(stored.len(), FIXTURE_LEN as usize);

    // MockConnector advertises series_info, so descriptive fields land too.
    let meta = metadata_store.get("SP500").await.unwrap();
    assert_eq!(meta.unit.as_deref(), Some("Index"));
    assert!(meta.description.is_some());
    assert_eq!(meta.data_start_date, Some(FIXTURE_START));
}

#[tokio::test]
async fn full_refresh_replaces_a_longer_cached_series() {
    // The source revised history away: the fresh pull is shorter than the
    // cache. Replace semantics mean the pull wins.
    let recorder = Arc::new(
        RecordingConnector::new().with_series("SP500", vec![obs(FIXTURE_START, 42)]),
    );
    let (storico, series_store, _meta) = storico_with(recorder);

    let stale: Vec<_> = (0..10).map(|i| obs(FIXTURE_START + Days::new(i), 1)).collect();
    series_store
        .write("SP500", &stale, WriteMode::Replace)
        .await
        .unwrap();

    let outcome = storico
        .refresh_series("SP500", RefreshMode::Full)
        .await
        .unwrap();
    assert_eq!(outcome.records_added, 1);

    let stored = series_store.read("SP500", None, None).await.unwrap();
    assert_eq!(stored, vec![obs(FIXTURE_START, 42)]);
}

#[tokio::test]
async fn empty_full_pull_leaves_the_cache_untouched() {
    let (storico, series_store, metadata_store) = storico_with(Arc::new(MockConnector::new()));

    let cached = vec![obs(FIXTURE_START, 7)];
    series_store
        .write("EMPTY", &cached, WriteMode::Replace)
        .await
        .unwrap();

    let outcome = storico
        .refresh_series("EMPTY", RefreshMode::Full)
        .await
        .unwrap();
    assert_eq!(outcome.records_added, 0);
    assert_eq!(
        series_store.read("EMPTY", None, None).await.unwrap(),
        cached
    );
    // The check itself is still recorded.
    assert!(metadata_store.get("EMPTY").await.unwrap().last_updated.is_some());
}

#[tokio::test]
async fn missing_series_info_capability_degrades_gracefully() {
    // RecordingConnector has no series_info provider; a full refresh must
    // still succeed, just without descriptive fields.
    let recorder = Arc::new(
        RecordingConnector::new().with_series("SP500", vec![obs(FIXTURE_START, 1)]),
    );
    let (storico, _series, metadata_store) = storico_with(recorder);

    storico
        .refresh_series("SP500", RefreshMode::Full)
        .await
        .unwrap();
    let meta = metadata_store.get("SP500").await.unwrap();
    assert_eq!(meta.unit, None);
    assert_eq!(meta.description, None);
    assert_eq!(meta.data_end_date, Some(FIXTURE_START));
}

#[tokio::test]
async fn refresh_batch_accepts_ad_hoc_ids_outside_any_catalog() {
    let (storico, series_store, _meta) = storico_with(Arc::new(MockConnector::new()));

    let report = storico
        .refresh_batch(["SP500", "DGS10"], RefreshMode::Full)
        .await;
    assert!(report.is_complete());
    assert!(series_store.exists("SP500").await);
    assert!(series_store.exists("DGS10").await);
}

#[tokio::test]
async fn refresh_all_walks_the_catalog_and_isolates_failures() {
    let catalog = storico::SeriesCatalog::from_json_str(
        r##"{ "series": [
            { "id": "SP500", "displayName": "S&P 500", "sourceName": "mock",
              "sourceNativeKey": "SP500", "category": "markets", "colorHint": "#1f77b4" },
            { "id": "FAIL", "displayName": "Broken", "sourceName": "mock",
              "sourceNativeKey": "FAIL", "category": "markets", "colorHint": "#d62728" }
        ] }"##,
    )
    .unwrap();
    let storico = Storico::builder()
        .with_series_store(Arc::new(MemorySeriesStore::new()))
        .with_metadata_store(Arc::new(MemoryMetadataStore::new()))
        .with_connector(Arc::new(MockConnector::new()))
        .with_catalog(catalog)
        .build()
        .unwrap();

    let report = storico.refresh_all(RefreshMode::Full).await;
    assert!(report.succeeded("SP500"));
    assert!(!report.succeeded("FAIL"));
    assert!(!report.is_complete());
    assert_eq!(report.records_added_total(), FIXTURE_LEN as usize);
}
