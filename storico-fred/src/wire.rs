//! Wire shapes for the two FRED endpoints we call. Field names follow the
//! JSON the API returns; everything arrives as strings, including numbers.

use serde::Deserialize;

/// Missing-data sentinel FRED emits in place of a value.
pub(crate) const MISSING_VALUE: &str = ".";

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationsResponse {
    pub observations: Vec<WireObservation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireObservation {
    pub date: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeriesResponse {
    // Yes, "seriess". That is the actual field name in the API.
    pub seriess: Vec<WireSeries>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireSeries {
    pub title: Option<String>,
    pub units: Option<String>,
    pub notes: Option<String>,
}
