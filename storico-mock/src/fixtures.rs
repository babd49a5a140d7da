use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use storico_core::{Observation, SourceSeriesInfo};

/// First fixture date. All fixture series start here.
pub const FIXTURE_START: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

/// Number of daily points in a dense fixture series.
pub const FIXTURE_LEN: u64 = 120;

fn dense(base: i64, step: i64) -> Vec<Observation> {
    (0..FIXTURE_LEN)
        .map(|i| {
            let date = FIXTURE_START + Days::new(i);
            // Small deterministic wobble so values are not monotone.
            let wobble = ((i as i64) % 7) - 3;
            let value = Decimal::new(base + step * i as i64 + wobble, 2);
            Observation::new(date, value)
        })
        .collect()
}

/// Like [`dense`] but with every fifth date absent, for exercising gap
/// handling in windows and normalization.
fn gappy() -> Vec<Observation> {
    dense(10_000, 25)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 5 != 0)
        .map(|(_, obs)| obs)
        .collect()
}

/// Deterministic observations for a fixture key, or `None` for unknown keys.
pub(crate) fn observations(series_key: &str) -> Option<Vec<Observation>> {
    match series_key {
        "SP500" | "TIMEOUT" => Some(dense(476_983, 120)),
        "DGS10" => Some(dense(395, 1)),
        "UNRATE" => Some(dense(370, 0)),
        "GAPPY" => Some(gappy()),
        _ => None,
    }
}

pub(crate) fn info(series_key: &str) -> Option<SourceSeriesInfo> {
    let (title, unit) = match series_key {
        "SP500" | "TIMEOUT" => ("S&P 500", "Index"),
        "DGS10" => ("10-Year Treasury Constant Maturity Rate", "Percent"),
        "UNRATE" => ("Unemployment Rate", "Percent"),
        "GAPPY" => ("Gappy Fixture", "Index"),
        _ => return None,
    };
    Some(SourceSeriesInfo {
        title: Some(title.to_owned()),
        unit: Some(unit.to_owned()),
        description: Some(format!("Deterministic fixture for {title}.")),
    })
}
