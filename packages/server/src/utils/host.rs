use common::HostApprovalStatus;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entity::host_request;
use crate::error::AppError;

/// The user's host approval status. No request on file counts as `Pending`.
pub async fn approval_status<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<HostApprovalStatus, AppError> {
    Ok(host_request::Entity::find()
        .filter(host_request::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .map(|r| r.status)
        .unwrap_or_default())
}
