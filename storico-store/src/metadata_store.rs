use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use storico_core::{MetadataPatch, MetadataStore, SeriesMetadata, StoricoError};

const RESOURCE: &str = "<metadata>";

/// A [`MetadataStore`] backed by one JSON document for the whole store.
///
/// The document maps series id to its [`SeriesMetadata`] record. Updates are
/// read-modify-write over the full document under an internal lock, then
/// published atomically via a temp-file rename. The per-document granularity
/// is deliberate: the catalog is tens of series, not thousands, and a single
/// human-readable file is easy to inspect and back up.
#[derive(Debug)]
pub struct JsonMetadataStore {
    path: PathBuf,
    // Serializes read-modify-write cycles between tasks sharing this store.
    write_lock: Mutex<()>,
}

impl JsonMetadataStore {
    /// Create a store persisting to the JSON file at `path`. A missing file
    /// reads as an empty document and is created on first update.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The document path this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, SeriesMetadata>, StoricoError> {
        if !self.path.is_file() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| StoricoError::storage(RESOURCE, e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| StoricoError::corrupt(RESOURCE, e.to_string()))
    }

    fn publish(&self, records: &BTreeMap<String, SeriesMetadata>) -> Result<(), StoricoError> {
        let io_err = |e: &dyn std::fmt::Display| StoricoError::storage(RESOURCE, e.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(&e))?;
        }
        let text = serde_json::to_string_pretty(records).map_err(|e| io_err(&e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| io_err(&e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_err(&e))
    }
}

#[async_trait]
impl MetadataStore for JsonMetadataStore {
    async fn get(&self, series_id: &str) -> Result<SeriesMetadata, StoricoError> {
        self.load()?
            .remove(series_id)
            .ok_or_else(|| StoricoError::not_found(format!("metadata for series {series_id}")))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, patch), err)
    )]
    async fn update(&self, series_id: &str, patch: MetadataPatch) -> Result<(), StoricoError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut records = self.load()?;
        records
            .entry(series_id.to_owned())
            .or_default()
            .apply(patch);
        self.publish(&records)
    }

    async fn get_all(&self) -> Result<BTreeMap<String, SeriesMetadata>, StoricoError> {
        self.load()
    }
}
