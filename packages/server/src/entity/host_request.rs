use common::HostApprovalStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user's request to become a hackathon host, decided by an administrator.
/// The unique `user_id` makes request creation idempotent.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "host_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub status: HostApprovalStatus,

    pub requested_at: DateTimeUtc,
    pub decided_at: Option<DateTimeUtc>,
    pub decided_by: Option<i32>,
}

impl ActiveModelBehavior for ActiveModel {}
