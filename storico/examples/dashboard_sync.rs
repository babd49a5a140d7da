//! Sync a small catalog into a temp directory and print a range view,
//! using the deterministic mock source. Run with `--features tracing` to
//! see the orchestrator's spans.

use std::sync::Arc;

use storico::{RangeKey, RefreshMode, Storico, filter_by_range};
use storico_mock::MockConnector;
use storico_store::{CsvSeriesStore, JsonMetadataStore};

const CATALOG: &str = r##"{ "series": [
    { "id": "SP500", "displayName": "S&P 500", "sourceName": "mock",
      "sourceNativeKey": "SP500", "category": "markets", "colorHint": "#1f77b4" },
    { "id": "UNRATE", "displayName": "Unemployment Rate", "sourceName": "mock",
      "sourceNativeKey": "UNRATE", "category": "labor", "colorHint": "#ff7f0e" }
] }"##;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let data_dir = tempfile::tempdir()?;
    let storico = Storico::builder()
        .with_series_store(Arc::new(CsvSeriesStore::new(data_dir.path().join("series"))))
        .with_metadata_store(Arc::new(JsonMetadataStore::new(
            data_dir.path().join("metadata.json"),
        )))
        .with_connector(Arc::new(MockConnector::new()))
        .with_catalog(storico::SeriesCatalog::from_json_str(CATALOG)?)
        .build()?;

    let report = storico.refresh_all(RefreshMode::Full).await;
    println!(
        "refreshed {} series, {} records",
        report.outcomes.len(),
        report.records_added_total()
    );

    let sp500 = storico.get_series("SP500").await?;
    let recent = filter_by_range(&sp500, RangeKey::M6);
    println!(
        "SP500: {} points total, {} in the last six months of data",
        sp500.len(),
        recent.len()
    );
    Ok(())
}
