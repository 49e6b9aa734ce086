#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a hackathon during its lifecycle.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum HackathonStatus {
    /// Being assembled by the organizer; visible to the organizer only.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Draft"))]
    Draft,
    /// Announced but not yet open; visible to the organizer only.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Upcoming"))]
    Upcoming,
    /// Publicly listed and open for registration.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Published"))]
    Published,
    /// Publicly listed and in progress.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Live"))]
    Live,
    /// Finished; results are viewable.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Completed"))]
    Completed,
    /// Withdrawn by the organizer before going live.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Cancelled"))]
    Cancelled,
    /// Removed by platform moderation before going live.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Rejected"))]
    Rejected,
}

impl HackathonStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }

    /// Returns true if the hackathon is visible to participants.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Published | Self::Live | Self::Completed)
    }

    /// All possible status values.
    pub const ALL: &'static [HackathonStatus] = &[
        Self::Draft,
        Self::Upcoming,
        Self::Published,
        Self::Live,
        Self::Completed,
        Self::Cancelled,
        Self::Rejected,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Upcoming => "Upcoming",
            Self::Published => "Published",
            Self::Live => "Live",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for HackathonStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            HackathonStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for HackathonStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Upcoming" => Ok(Self::Upcoming),
            "Published" => Ok(Self::Published),
            "Live" => Ok(Self::Live),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        for status in HackathonStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            let parsed: HackathonStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Live".parse::<HackathonStatus>().unwrap(),
            HackathonStatus::Live
        );
        assert!("Paused".parse::<HackathonStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(HackathonStatus::Completed.is_terminal());
        assert!(HackathonStatus::Cancelled.is_terminal());
        assert!(HackathonStatus::Rejected.is_terminal());
        assert!(!HackathonStatus::Live.is_terminal());
        assert!(!HackathonStatus::Draft.is_terminal());
    }
}
