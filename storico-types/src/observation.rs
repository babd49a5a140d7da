use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single `(date, value)` data point for a series.
///
/// Values are kept as [`Decimal`] so that the decimal text reported by the
/// source round-trips through persistence without precision loss. Source
/// gaps (sentinel "missing" values) are never materialized as observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Reported value on that date.
    pub value: Decimal,
}

impl Observation {
    /// Construct an observation.
    #[must_use]
    pub const fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}
