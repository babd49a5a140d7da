use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use storico_types::{Observation, RangeKey, StoricoError};

/// Rescale a series so the observation at `base_date` equals exactly 100.
///
/// Every value becomes `(value / base) * 100`. There is no look-back or
/// look-forward substitution: a normalization against the wrong baseline
/// would silently produce a misleading chart, so precondition violations are
/// surfaced instead of defaulted.
///
/// # Errors
/// - `BaseDateNotFound` if `base_date` has no observation in the series.
/// - `ZeroBaseline` if the base observation is literally zero.
pub fn normalize_to_scale(
    series: &[Observation],
    base_date: NaiveDate,
) -> Result<Vec<Observation>, StoricoError> {
    let base = series
        .iter()
        .find(|obs| obs.date == base_date)
        .map(|obs| obs.value)
        .ok_or(StoricoError::BaseDateNotFound { date: base_date })?;

    if base.is_zero() {
        return Err(StoricoError::ZeroBaseline { date: base_date });
    }

    series
        .iter()
        .map(|obs| {
            obs.value
                .checked_div(base)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|scaled| Observation::new(obs.date, scaled))
                .ok_or_else(|| {
                    StoricoError::InvalidArg(format!(
                        "normalized value overflows at {}",
                        obs.date
                    ))
                })
        })
        .collect()
}

/// Normalize against the first observation at or after `window_start`.
///
/// This is the base-selection policy for a display window: the window's
/// start date itself may fall on a gap, in which case the next observed
/// date anchors the scale.
///
/// # Errors
/// - `BaseDateNotFound` if no observation falls at or after `window_start`.
/// - `ZeroBaseline` if the selected base observation is zero.
pub fn normalize_from_window_start(
    series: &[Observation],
    window_start: NaiveDate,
) -> Result<Vec<Observation>, StoricoError> {
    let base_date = series
        .iter()
        .map(|obs| obs.date)
        .find(|date| *date >= window_start)
        .ok_or(StoricoError::BaseDateNotFound { date: window_start })?;
    normalize_to_scale(series, base_date)
}

/// Filter a series to a logical lookback window.
///
/// The window is calendar-based and anchored to the series' own latest
/// observation date — not the wall clock — so the result is deterministic
/// given only the series. The boundary is inclusive: observations dated
/// exactly `latest - window` are kept. `RangeKey::All` returns the input
/// unchanged; an empty series yields an empty result.
///
/// The input is assumed sorted ascending, as every [`crate::SeriesStore`]
/// read and connector fetch guarantees.
#[must_use]
pub fn filter_by_range(series: &[Observation], range: RangeKey) -> Vec<Observation> {
    let Some(months) = range.months() else {
        return series.to_vec();
    };
    let Some(latest) = series.last().map(|obs| obs.date) else {
        return Vec::new();
    };
    let cutoff = latest
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    series
        .iter()
        .filter(|obs| obs.date >= cutoff)
        .copied()
        .collect()
}
