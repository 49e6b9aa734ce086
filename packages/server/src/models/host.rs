use chrono::{DateTime, Utc};
use common::HostApprovalStatus;
use common::host_approval::HostDecision;
use serde::{Deserialize, Serialize};

use super::shared::Pagination;
use crate::entity::host_request;

#[derive(Deserialize, utoipa::IntoParams)]
pub struct HostRequestListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Filter by status: "Pending", "Approved", or "Rejected".
    pub status: Option<String>,
}

/// Admin's decision on a pending host request.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct HostDecisionRequest {
    /// "Approve" or "Reject".
    pub outcome: HostDecision,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HostRequestResponse {
    pub id: i32,
    pub user_id: i32,
    pub status: HostApprovalStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Admin who decided the request, once decided.
    pub decided_by: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HostRequestListResponse {
    pub data: Vec<HostRequestResponse>,
    pub pagination: Pagination,
}

impl From<host_request::Model> for HostRequestResponse {
    fn from(m: host_request::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            status: m.status,
            requested_at: m.requested_at,
            decided_at: m.decided_at,
            decided_by: m.decided_by,
        }
    }
}
