use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use storico_types::Observation;

/// Sort observations ascending and deduplicate by date.
///
/// For exact-duplicate dates supplied in one batch, the last occurrence wins.
/// This is the canonical form every store write passes through.
#[must_use]
pub fn sort_dedup(observations: Vec<Observation>) -> Vec<Observation> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for obs in observations {
        by_date.insert(obs.date, obs.value);
    }
    by_date
        .into_iter()
        .map(|(date, value)| Observation::new(date, value))
        .collect()
}

/// Merge `incoming` observations into `existing` ones.
///
/// On date collisions the incoming value wins: the remote source is
/// authoritative over anything previously cached. The result is sorted
/// ascending with no duplicate dates.
#[must_use]
pub fn merge_append(existing: Vec<Observation>, incoming: Vec<Observation>) -> Vec<Observation> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = existing
        .into_iter()
        .map(|obs| (obs.date, obs.value))
        .collect();
    for obs in incoming {
        by_date.insert(obs.date, obs.value);
    }
    by_date
        .into_iter()
        .map(|(date, value)| Observation::new(date, value))
        .collect()
}

// Inline tests omitted; covered by property tests in `storico-core/tests/`.
