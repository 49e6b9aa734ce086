use common::HackathonStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hackathon")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub category: String,
    pub description: String, // in Markdown
    pub status: HackathonStatus,

    pub organizer_id: i32,
    #[sea_orm(belongs_to, from = "organizer_id", to = "id")]
    pub organizer: HasOne<super::user::Entity>,

    /// Date ordering (registration_start <= registration_end <= start_date
    /// <= submission_deadline <= end_date) is validated at creation time;
    /// the lifecycle engine relies on it for window checks.
    pub registration_start: DateTimeUtc,
    pub registration_end: DateTimeUtc,
    pub start_date: DateTimeUtc,
    pub end_date: DateTimeUtc,
    pub submission_deadline: DateTimeUtc,

    pub min_team_size: i32,
    pub max_team_size: i32,
    pub allow_individual: bool,

    /// NULL until uploaded; all required before leaving Draft visibility.
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub rules: Option<String>,
    pub dataset_url: Option<String>,
    pub contact_email: Option<String>,

    /// Creation-fee receipt, recorded when the fee gated creation.
    pub payment_id: Option<String>,
    pub provider_payment_id: Option<String>,

    #[sea_orm(has_many)]
    pub tracks: HasMany<super::track::Entity>,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::registration::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
