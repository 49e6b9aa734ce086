//! Host (organizer) account approval workflow.
//!
//! A signup request starts `Pending` and is decided exactly once by an
//! administrator. Approval does not change the user's role; it only unlocks
//! the creation gate. Request creation itself is idempotent at the
//! persistence layer (unique `user_id`), so calling it twice returns the
//! same pending request.

#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::actor::Actor;

/// Status of a host approval request.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "PascalCase")]
pub enum HostApprovalStatus {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Pending"))]
    Pending,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Approved"))]
    Approved,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Rejected"))]
    Rejected,
}

impl HostApprovalStatus {
    /// Returns true once an administrator has ruled on the request.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub const ALL: &'static [HostApprovalStatus] =
        &[Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for HostApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for HostApprovalStatus {
    fn default() -> Self {
        Self::Pending
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
            "Invalid status '{}'. Valid values: Pending, Approved, Rejected",
            self.invalid
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for HostApprovalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// An administrator's ruling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum HostDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostApprovalError {
    #[error("only an administrator may decide host requests")]
    Forbidden,
    #[error("this host request has already been decided")]
    AlreadyDecided,
}

/// Returns true if this approval status unlocks hackathon creation.
pub fn can_create(status: HostApprovalStatus) -> bool {
    status == HostApprovalStatus::Approved
}

/// Rule on a pending host request. Terminal once decided; no re-review.
pub fn decide(
    current: HostApprovalStatus,
    decision: HostDecision,
    actor: &Actor,
) -> Result<HostApprovalStatus, HostApprovalError> {
    if !actor.is_admin() {
        return Err(HostApprovalError::Forbidden);
    }
    if current.is_decided() {
        return Err(HostApprovalError::AlreadyDecided);
    }
    Ok(match decision {
        HostDecision::Approve => HostApprovalStatus::Approved,
        HostDecision::Reject => HostApprovalStatus::Rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorRole;

    fn admin() -> Actor {
        Actor::new(1, ActorRole::Admin)
    }

    #[test]
    fn admin_decides_pending_request() {
        assert_eq!(
            decide(HostApprovalStatus::Pending, HostDecision::Approve, &admin()),
            Ok(HostApprovalStatus::Approved)
        );
        assert_eq!(
            decide(HostApprovalStatus::Pending, HostDecision::Reject, &admin()),
            Ok(HostApprovalStatus::Rejected)
        );
    }

    #[test]
    fn non_admin_is_forbidden() {
        for role in [ActorRole::Host, ActorRole::Participant] {
            let actor = Actor::new(2, role);
            assert_eq!(
                decide(HostApprovalStatus::Pending, HostDecision::Approve, &actor),
                Err(HostApprovalError::Forbidden)
            );
        }
    }

    #[test]
    fn decided_requests_are_terminal() {
        for current in [HostApprovalStatus::Approved, HostApprovalStatus::Rejected] {
            assert_eq!(
                decide(current, HostDecision::Approve, &admin()),
                Err(HostApprovalError::AlreadyDecided)
            );
        }
    }

    #[test]
    fn only_approved_unlocks_creation() {
        assert!(can_create(HostApprovalStatus::Approved));
        assert!(!can_create(HostApprovalStatus::Pending));
        assert!(!can_create(HostApprovalStatus::Rejected));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Pending".parse::<HostApprovalStatus>().unwrap(),
            HostApprovalStatus::Pending
        );
        assert!("Open".parse::<HostApprovalStatus>().is_err());
    }
}
