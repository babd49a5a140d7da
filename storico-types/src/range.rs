use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoricoError;

/// Logical lookback window for display filtering.
///
/// Windows are calendar-based and anchored to a series' own latest
/// observation date, so filtering is deterministic given only the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RangeKey {
    /// Six calendar months back from the latest observation.
    M6,
    /// One year back.
    Y1,
    /// Three years back.
    Y3,
    /// Five years back.
    Y5,
    /// The full series, unfiltered.
    #[default]
    All,
}

impl RangeKey {
    /// Window length in calendar months; `None` for [`RangeKey::All`].
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::M6 => Some(6),
            Self::Y1 => Some(12),
            Self::Y3 => Some(36),
            Self::Y5 => Some(60),
            Self::All => None,
        }
    }

    /// Canonical textual key ("6m", "1y", "3y", "5y", "all").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::M6 => "6m",
            Self::Y1 => "1y",
            Self::Y3 => "3y",
            Self::Y5 => "5y",
            Self::All => "all",
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeKey {
    type Err = StoricoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6m" => Ok(Self::M6),
            "1y" => Ok(Self::Y1),
            "3y" => Ok(Self::Y3),
            "5y" => Ok(Self::Y5),
            "all" => Ok(Self::All),
            other => Err(StoricoError::InvalidArg(format!(
                "unknown range key '{other}' (expected 6m, 1y, 3y, 5y, or all)"
            ))),
        }
    }
}
