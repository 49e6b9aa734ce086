use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A team's project submission. One per registration.
///
/// Created and edited only while the hackathon's submission window is open;
/// after the deadline, only a draft that was never finalized stays editable.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub registration_id: i32,
    #[sea_orm(belongs_to, from = "registration_id", to = "id")]
    pub registration: HasOne<super::registration::Entity>,

    /// External payload references; storage is a collaborator concern.
    pub repo_url: String,
    pub demo_url: Option<String>,
    pub description: String,

    pub is_draft: bool,
    /// NULL while the submission is still a draft.
    pub submitted_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
