//! Sync operations on the orchestrator: cache-first reads and source
//! refreshes, single-series and batch.

mod get;
mod refresh;
