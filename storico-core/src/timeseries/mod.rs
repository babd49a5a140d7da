//! Pure helpers over already-materialized series.
//!
//! Nothing here touches a store or the network; the sync layer and the
//! presentation boundary both consume these.

pub mod merge;
pub mod transform;
