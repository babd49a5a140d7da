use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use storico_core::{Observation, SeriesStore, StoricoError, WriteMode};
use storico_store::CsvSeriesStore;
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn obs(y: i32, m: u32, d: u32, v: &str) -> Observation {
    Observation::new(day(y, m, d), Decimal::from_str(v).unwrap())
}

fn store() -> (TempDir, CsvSeriesStore) {
    let dir = TempDir::new().unwrap();
    let store = CsvSeriesStore::new(dir.path());
    (dir, store)
}

#[tokio::test]
async fn replace_then_read_round_trips_values_exactly() {
    let (_dir, store) = store();
    let written = vec![
        obs(2024, 1, 1, "4769.83"),
        obs(2024, 1, 2, "4742.83"),
        obs(2024, 1, 3, "4704.81"),
    ];
    let count = store
        .write("SP500", &written, WriteMode::Replace)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let read = store.read("SP500", None, None).await.unwrap();
    assert_eq!(read, written);
}

#[tokio::test]
async fn read_of_unknown_series_is_not_found() {
    let (_dir, store) = store();
    let err = store.read("DGS10", None, None).await.unwrap_err();
    assert!(matches!(err, StoricoError::NotFound { .. }));
    assert!(!store.exists("DGS10").await);
}

#[tokio::test]
async fn replace_discards_previous_contents() {
    let (_dir, store) = store();
    store
        .write("CPIAUCSL", &[obs(2020, 1, 1, "258.7")], WriteMode::Replace)
        .await
        .unwrap();
    store
        .write("CPIAUCSL", &[obs(2024, 1, 1, "308.4")], WriteMode::Replace)
        .await
        .unwrap();

    let read = store.read("CPIAUCSL", None, None).await.unwrap();
    assert_eq!(read, vec![obs(2024, 1, 1, "308.4")]);
}

#[tokio::test]
async fn append_merges_and_incoming_wins_on_collisions() {
    let (_dir, store) = store();
    store
        .write(
            "UNRATE",
            &[obs(2024, 1, 1, "3.7"), obs(2024, 2, 1, "3.9")],
            WriteMode::Replace,
        )
        .await
        .unwrap();
    let count = store
        .write(
            "UNRATE",
            &[obs(2024, 2, 1, "3.8"), obs(2024, 3, 1, "3.9")],
            WriteMode::Append,
        )
        .await
        .unwrap();
    assert_eq!(count, 3);

    let read = store.read("UNRATE", None, None).await.unwrap();
    assert_eq!(
        read,
        vec![
            obs(2024, 1, 1, "3.7"),
            obs(2024, 2, 1, "3.8"),
            obs(2024, 3, 1, "3.9"),
        ]
    );
}

#[tokio::test]
async fn append_to_a_series_never_written_creates_it() {
    let (_dir, store) = store();
    store
        .write("GDP", &[obs(2024, 1, 1, "28000")], WriteMode::Append)
        .await
        .unwrap();
    assert!(store.exists("GDP").await);
}

#[tokio::test]
async fn write_sorts_and_dedups_unordered_input() {
    let (_dir, store) = store();
    store
        .write(
            "DGS10",
            &[
                obs(2024, 1, 3, "3.91"),
                obs(2024, 1, 1, "3.95"),
                obs(2024, 1, 1, "3.88"),
            ],
            WriteMode::Replace,
        )
        .await
        .unwrap();

    let read = store.read("DGS10", None, None).await.unwrap();
    // Last occurrence of the duplicated date wins.
    assert_eq!(read, vec![obs(2024, 1, 1, "3.88"), obs(2024, 1, 3, "3.91")]);
}

#[tokio::test]
async fn read_honors_inclusive_bounds() {
    let (_dir, store) = store();
    store
        .write(
            "SP500",
            &[
                obs(2024, 1, 1, "1"),
                obs(2024, 1, 2, "2"),
                obs(2024, 1, 3, "3"),
                obs(2024, 1, 4, "4"),
            ],
            WriteMode::Replace,
        )
        .await
        .unwrap();

    let read = store
        .read("SP500", Some(day(2024, 1, 2)), Some(day(2024, 1, 3)))
        .await
        .unwrap();
    assert_eq!(read, vec![obs(2024, 1, 2, "2"), obs(2024, 1, 3, "3")]);

    let read = store
        .read("SP500", Some(day(2025, 1, 1)), None)
        .await
        .unwrap();
    assert!(read.is_empty());
}

#[tokio::test]
async fn date_range_reports_first_and_last() {
    let (_dir, store) = store();
    store
        .write(
            "SP500",
            &[obs(2020, 1, 2, "1"), obs(2024, 12, 31, "2")],
            WriteMode::Replace,
        )
        .await
        .unwrap();
    let (start, end) = store.date_range("SP500").await.unwrap();
    assert_eq!(start, day(2020, 1, 2));
    assert_eq!(end, day(2024, 12, 31));
}

#[tokio::test]
async fn empty_replace_leaves_an_empty_series() {
    let (_dir, store) = store();
    store.write("SP500", &[], WriteMode::Replace).await.unwrap();
    assert!(store.exists("SP500").await);
    assert!(store.read("SP500", None, None).await.unwrap().is_empty());
    let err = store.date_range("SP500").await.unwrap_err();
    assert!(matches!(err, StoricoError::NotFound { .. }));
}

#[tokio::test]
async fn out_of_order_file_reads_as_corrupt() {
    let (dir, store) = store();
    std::fs::write(
        dir.path().join("SP500.csv"),
        "date,value\n2024-01-02,2\n2024-01-01,1\n",
    )
    .unwrap();

    let err = store.read("SP500", None, None).await.unwrap_err();
    assert!(matches!(err, StoricoError::Corrupt { .. }));
}

#[tokio::test]
async fn unparsable_value_reads_as_corrupt() {
    let (dir, store) = store();
    std::fs::write(
        dir.path().join("SP500.csv"),
        "date,value\n2024-01-01,not-a-number\n",
    )
    .unwrap();

    let err = store.read("SP500", None, None).await.unwrap_err();
    assert!(matches!(err, StoricoError::Corrupt { .. }));
}

#[tokio::test]
async fn hostile_series_id_is_rejected_before_touching_the_fs() {
    let (_dir, store) = store();
    let err = store
        .write("../escape", &[obs(2024, 1, 1, "1")], WriteMode::Replace)
        .await
        .unwrap_err();
    assert!(matches!(err, StoricoError::InvalidArg(_)));
}

#[tokio::test]
async fn file_format_is_plain_two_column_csv() {
    let (dir, store) = store();
    store
        .write("SP500", &[obs(2024, 1, 2, "4742.83")], WriteMode::Replace)
        .await
        .unwrap();
    let text = std::fs::read_to_string(dir.path().join("SP500.csv")).unwrap();
    assert_eq!(text, "date,value\n2024-01-02,4742.83\n");

    // The temp file used for atomic publishing never lingers.
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
