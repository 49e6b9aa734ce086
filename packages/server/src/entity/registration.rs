use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's participation in a hackathon, optionally through a team.
///
/// At most one registration per (hackathon, user): enforced by a unique
/// index created at startup, since two racing requests can both pass the
/// eligibility decision.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub hackathon_id: i32,
    #[sea_orm(belongs_to, from = "hackathon_id", to = "id")]
    pub hackathon: HasOne<super::hackathon::Entity>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    /// One of: Individual, Team.
    pub kind: String,
    pub team_name: Option<String>,

    /// NULL when the hackathon defines no tracks.
    pub track_id: Option<i32>,
    #[sea_orm(belongs_to, from = "track_id", to = "id")]
    pub track: Option<super::track::Entity>,

    #[sea_orm(has_many)]
    pub members: HasMany<super::team_member::Entity>,

    #[sea_orm(has_one)]
    pub submission: HasOne<super::submission::Entity>,

    pub registered_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
