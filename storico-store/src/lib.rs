//! storico-store
//!
//! File-backed implementations of the `storico-core` persistence contracts:
//!
//! - [`CsvSeriesStore`]: one `<id>.csv` file per series under a data
//!   directory, two columns (`date,value`), dates strictly increasing.
//! - [`JsonMetadataStore`]: a single JSON document holding every series'
//!   bookkeeping record, keyed by series id.
//!
//! Both stores publish writes atomically by writing a sibling temp file and
//! renaming it over the target, so a crash mid-write never leaves a torn
//! file visible to readers. Files are small (a few thousand rows at most),
//! so I/O is performed inline on the calling task.
#![warn(missing_docs)]

mod csv_store;
mod metadata_store;

pub use csv_store::CsvSeriesStore;
pub use metadata_store::JsonMetadataStore;

use storico_core::StoricoError;

/// Validate a series id before using it as a file-name stem.
///
/// Ids come from the catalog and from callers; anything that could escape
/// the data directory (separators, parent references) or hide files
/// (leading dot) is rejected outright.
fn checked_file_stem(series_id: &str) -> Result<&str, StoricoError> {
    let ok = !series_id.is_empty()
        && !series_id.starts_with('.')
        && series_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(series_id)
    } else {
        Err(StoricoError::InvalidArg(format!(
            "series id '{series_id}' is not usable as a file name"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::checked_file_stem;

    #[test]
    fn file_stem_accepts_catalog_style_ids() {
        for id in ["SP500", "DGS10", "CPIAUCSL", "eur-usd", "gdp_q1.rev"] {
            assert!(checked_file_stem(id).is_ok(), "{id}");
        }
    }

    #[test]
    fn file_stem_rejects_path_escapes() {
        for id in ["", "..", "../etc/passwd", "a/b", "a\\b", ".hidden", "sp 500"] {
            assert!(checked_file_stem(id).is_err(), "{id}");
        }
    }
}
