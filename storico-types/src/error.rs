use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unified error type for the storico workspace.
///
/// This wraps store lookups that came up empty, remote-source failures,
/// violated transform preconditions, and corruption detected while reading
/// our own persisted data.
///
/// `Display` and `std::error::Error` are implemented by hand (rather than
/// via `thiserror`) because the `source` fields here name the failing
/// connector, not an underlying error cause.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoricoError {
    /// A series or metadata record could not be found where a read was attempted.
    NotFound {
        /// Description of the missing resource, e.g. "series SP500".
        what: String,
    },

    /// The remote source could not be reached or answered with a non-data
    /// failure (network, auth, rate limit, timeout).
    SourceUnavailable {
        /// Connector name that failed.
        source: String,
        /// Human-readable failure detail.
        msg: String,
    },

    /// The remote source rejected the series identifier itself.
    InvalidSeries {
        /// Connector name that rejected the request.
        source: String,
        /// The series key the remote refused.
        series: String,
    },

    /// An incremental refresh was attempted with no prior full sync to
    /// extend from. Run a full refresh first.
    MissingBaseline {
        /// Series id without a recorded `data_end_date`.
        series: String,
    },

    /// Normalization was requested against a date with no observation.
    /// No look-back or look-forward substitution is performed.
    BaseDateNotFound {
        /// The requested base date.
        date: NaiveDate,
    },

    /// Normalization was requested against a literal zero baseline.
    ZeroBaseline {
        /// Date of the zero-valued base observation.
        date: NaiveDate,
    },

    /// Persisted data failed an invariant check on read (dates not strictly
    /// increasing, unparsable value). Never auto-repaired.
    Corrupt {
        /// Series id whose stored data failed validation.
        series: String,
        /// What the validation found.
        msg: String,
    },

    /// An I/O-level failure in the persistence layer.
    Storage {
        /// Series id (or store resource) involved in the failed operation.
        series: String,
        /// Human-readable I/O detail.
        msg: String,
    },

    /// The requested capability is not implemented by the configured connector.
    Unsupported {
        /// A capability string describing what was requested (e.g. "observations").
        capability: String,
    },

    /// Invalid input argument.
    InvalidArg(String),
}

impl std::fmt::Display for StoricoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { what } => write!(f, "not found: {what}"),
            Self::SourceUnavailable { source, msg } => {
                write!(f, "source {source} unavailable: {msg}")
            }
            Self::InvalidSeries { source, series } => {
                write!(f, "source {source} rejected series '{series}'")
            }
            Self::MissingBaseline { series } => {
                write!(
                    f,
                    "no sync baseline for series '{series}'; run a full refresh first"
                )
            }
            Self::BaseDateNotFound { date } => write!(f, "no observation at base date {date}"),
            Self::ZeroBaseline { date } => {
                write!(f, "cannot normalize against zero baseline at {date}")
            }
            Self::Corrupt { series, msg } => write!(f, "series '{series}' is corrupt: {msg}"),
            Self::Storage { series, msg } => write!(f, "storage failure for '{series}': {msg}"),
            Self::Unsupported { capability } => write!(f, "unsupported capability: {capability}"),
            Self::InvalidArg(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for StoricoError {}

impl StoricoError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `SourceUnavailable` error with the connector name and detail.
    pub fn source(source: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source: source.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceUnavailable` error for a timed-out connector call.
    ///
    /// Timeouts fold into the source-unavailable taxonomy: the caller only
    /// needs to know the remote did not answer, not why.
    pub fn timeout(source: impl Into<String>, after: std::time::Duration) -> Self {
        Self::SourceUnavailable {
            source: source.into(),
            msg: format!("timed out after {}ms", after.as_millis()),
        }
    }

    /// Helper: build an `InvalidSeries` error.
    pub fn invalid_series(source: impl Into<String>, series: impl Into<String>) -> Self {
        Self::InvalidSeries {
            source: source.into(),
            series: series.into(),
        }
    }

    /// Helper: build a `MissingBaseline` error.
    pub fn missing_baseline(series: impl Into<String>) -> Self {
        Self::MissingBaseline {
            series: series.into(),
        }
    }

    /// Helper: build a `Corrupt` error for a series that failed read validation.
    pub fn corrupt(series: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Corrupt {
            series: series.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Storage` error from an I/O failure.
    pub fn storage(series: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Storage {
            series: series.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }
}
