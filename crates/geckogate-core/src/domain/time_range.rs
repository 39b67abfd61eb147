use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// History window offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[default]
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl TimeRange {
    pub const ALL: [Self; 6] = [
        Self::OneDay,
        Self::SevenDays,
        Self::ThirtyDays,
        Self::NinetyDays,
        Self::OneYear,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::OneYear => "1y",
            Self::Max => "max",
        }
    }

    /// Value of the upstream `days` lookback parameter.
    pub const fn lookback_days(self) -> &'static str {
        match self {
            Self::OneDay => "1",
            Self::SevenDays => "7",
            Self::ThirtyDays => "30",
            Self::NinetyDays => "90",
            Self::OneYear => "365",
            Self::Max => "max",
        }
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            "90d" => Ok(Self::NinetyDays),
            "1y" => Ok(Self::OneYear),
            "max" => Ok(Self::Max),
            other => Err(ValidationError::InvalidTimeRange {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_ranges_to_lookback_days() {
        let days = TimeRange::ALL.map(TimeRange::lookback_days);
        assert_eq!(days, ["1", "7", "30", "90", "365", "max"]);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(TimeRange::from_str("1Y"), Ok(TimeRange::OneYear));
        assert_eq!(TimeRange::from_str(" MAX "), Ok(TimeRange::Max));
    }

    #[test]
    fn rejects_unknown_range() {
        let err = TimeRange::from_str("2w").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
    }
}
