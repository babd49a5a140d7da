use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoricoError;

/// Static configuration record for one tracked series.
///
/// Loaded once from external configuration and immutable for the lifetime of
/// the process. The `id` is the local identifier the stores are keyed by;
/// `source_native_key` is what the remote source knows the series as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDescriptor {
    /// Local, stable series identifier (e.g. "SP500").
    pub id: String,
    /// Human-friendly name for presentation layers.
    pub display_name: String,
    /// Name of the remote source this series comes from (e.g. "fred").
    pub source_name: String,
    /// Series key in the remote source's own namespace.
    pub source_native_key: String,
    /// Category tag for grouping in presentation layers.
    pub category: String,
    /// Display color hint; opaque to this core.
    pub color_hint: String,
}

#[derive(Deserialize)]
struct CatalogDoc {
    series: Vec<SeriesDescriptor>,
}

/// Immutable lookup table of configured series, keyed by local id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesCatalog {
    by_id: BTreeMap<String, SeriesDescriptor>,
}

impl SeriesCatalog {
    /// Build a catalog from descriptor records. Later duplicates of an id win.
    #[must_use]
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = SeriesDescriptor>) -> Self {
        Self {
            by_id: descriptors
                .into_iter()
                .map(|d| (d.id.clone(), d))
                .collect(),
        }
    }

    /// Parse a catalog from a JSON document of the form `{"series": [...]}`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the document does not parse.
    pub fn from_json_str(json: &str) -> Result<Self, StoricoError> {
        let doc: CatalogDoc = serde_json::from_str(json)
            .map_err(|e| StoricoError::InvalidArg(format!("invalid series catalog: {e}")))?;
        Ok(Self::from_descriptors(doc.series))
    }

    /// Look up a descriptor by local id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SeriesDescriptor> {
        self.by_id.get(id)
    }

    /// The remote-source key to request for a local id.
    ///
    /// Falls back to the id itself when the series is not in the catalog, so
    /// ad-hoc ids whose local and remote names coincide still work.
    #[must_use]
    pub fn source_key_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id
            .get(id)
            .map_or(id, |d| d.source_native_key.as_str())
    }

    /// All configured local ids, in stable (sorted) order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    /// Iterate over all descriptors in stable (sorted-by-id) order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesDescriptor> {
        self.by_id.values()
    }

    /// Number of configured series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
