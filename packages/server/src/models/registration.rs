use chrono::{DateTime, Utc};
use common::team::{MemberDraft, RegistrationInput, RegistrationKind};
use serde::{Deserialize, Serialize};

use crate::entity::{registration, team_member};

/// Request body for hackathon registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterForHackathonRequest {
    pub kind: RegistrationKind,
    /// Contact email of the registering user; they become the team leader.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Required for team registration.
    pub team_name: Option<String>,
    /// Additional members. The registering user is the leader and is not
    /// listed here.
    #[serde(default)]
    pub members: Vec<MemberDraft>,
    /// Chosen track name, required when the hackathon defines tracks.
    pub track: Option<String>,
}

impl RegisterForHackathonRequest {
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            kind: self.kind,
            team_name: self.team_name.clone(),
            members: self.members.clone(),
            track: self.track.clone(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamMemberResponse {
    pub name: String,
    pub email: String,
    /// "Leader" or "Member".
    #[schema(example = "Leader")]
    pub role: String,
}

impl From<team_member::Model> for TeamMemberResponse {
    fn from(m: team_member::Model) -> Self {
        Self {
            name: m.name,
            email: m.email,
            role: m.role,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: i32,
    pub hackathon_id: i32,
    /// "Individual" or "Team".
    #[schema(example = "Team")]
    pub kind: String,
    pub team_name: Option<String>,
    /// Leader first, then members in registration order.
    pub members: Vec<TeamMemberResponse>,
    /// Chosen track name, when the hackathon defines tracks.
    pub track: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl RegistrationResponse {
    pub fn from_model(
        m: registration::Model,
        members: Vec<team_member::Model>,
        track: Option<String>,
    ) -> Self {
        Self {
            id: m.id,
            hackathon_id: m.hackathon_id,
            kind: m.kind,
            team_name: m.team_name,
            members: members.into_iter().map(TeamMemberResponse::from).collect(),
            track,
            registered_at: m.registered_at,
        }
    }
}
