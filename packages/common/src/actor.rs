use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Platform role attached to an authenticated caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Admin,
    Host,
    Participant,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Host => "host",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    invalid: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid role '{}'. Valid values: admin, host, participant",
            self.invalid
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for ActorRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "host" => Ok(Self::Host),
            "participant" => Ok(Self::Participant),
            _ => Err(ParseRoleError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// The caller of a guarded operation.
///
/// Every rule function takes the actor explicitly rather than reading
/// ambient session state, so decisions stay replayable in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: i32, role: ActorRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<ActorRole>().unwrap(), ActorRole::Admin);
        assert_eq!("host".parse::<ActorRole>().unwrap(), ActorRole::Host);
        assert!("superuser".parse::<ActorRole>().is_err());
    }
}
