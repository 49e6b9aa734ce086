use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::HostApprovalStatus;
use common::host_approval;
use sea_orm::*;
use tracing::instrument;

use crate::entity::host_request;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::host::{
    HostDecisionRequest, HostRequestListQuery, HostRequestListResponse, HostRequestResponse,
};
use crate::models::shared::Pagination;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Host Requests",
    operation_id = "requestHost",
    summary = "Request host approval",
    description = "Files a host approval request for the caller. Idempotent: a repeated call \
        returns the existing request with status 200 instead of creating another.",
    responses(
        (status = 201, description = "Request created", body = HostRequestResponse),
        (status = 200, description = "Request already on file", body = HostRequestResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn request_host(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let new_request = host_request::ActiveModel {
        user_id: Set(auth_user.user_id),
        status: Set(HostApprovalStatus::Pending),
        requested_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_request.insert(&state.db).await {
        Ok(model) => {
            tracing::info!(user_id = auth_user.user_id, "Host request filed");
            Ok((StatusCode::CREATED, Json(HostRequestResponse::from(model))).into_response())
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let existing = host_request::Entity::find()
                .filter(host_request::Column::UserId.eq(auth_user.user_id))
                .one(&state.db)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(
                        "Host request unique violation but no existing row found".into(),
                    )
                })?;
            Ok((StatusCode::OK, Json(HostRequestResponse::from(existing))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Host Requests",
    operation_id = "getMyHostRequest",
    summary = "Get the caller's host request",
    responses(
        (status = 200, description = "Host request", body = HostRequestResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No request on file (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_my_host_request(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<HostRequestResponse>, AppError> {
    let model = host_request::Entity::find()
        .filter(host_request::Column::UserId.eq(auth_user.user_id))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No host request on file".into()))?;
    Ok(Json(HostRequestResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Host Requests",
    operation_id = "listHostRequests",
    summary = "List host requests (admin only)",
    params(HostRequestListQuery),
    responses(
        (status = 200, description = "List of host requests", body = HostRequestListResponse),
        (status = 400, description = "Invalid status filter (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_host_requests(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<HostRequestListQuery>,
) -> Result<Json<HostRequestListResponse>, AppError> {
    auth_user.require_admin()?;

    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = host_request::Entity::find();
    if let Some(ref status) = query.status {
        let status: HostApprovalStatus = status
            .parse()
            .map_err(|e: common::host_approval::ParseStatusError| {
                AppError::Validation(e.to_string())
            })?;
        select = select.filter(host_request::Column::Status.eq(status.as_str()));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by_asc(host_request::Column::RequestedAt)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(HostRequestResponse::from)
        .collect();

    Ok(Json(HostRequestListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/decision",
    tag = "Host Requests",
    operation_id = "decideHostRequest",
    summary = "Approve or reject a host request (admin only)",
    description = "Rules on a pending request. Decisions are terminal; a decided request \
        returns 409.",
    params(("id" = i32, Path, description = "Host request ID")),
    request_body = HostDecisionRequest,
    responses(
        (status = 200, description = "Request decided", body = HostRequestResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Host request not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already decided (ALREADY_DECIDED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn decide_host_request(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<HostDecisionRequest>,
) -> Result<Json<HostRequestResponse>, AppError> {
    use sea_orm::sea_query::LockType;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let existing = host_request::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Host request not found".into()))?;

    let next = host_approval::decide(existing.status, payload.outcome, &auth_user.actor())?;

    let mut active: host_request::ActiveModel = existing.into();
    active.status = Set(next);
    active.decided_at = Set(Some(now));
    active.decided_by = Set(Some(auth_user.user_id));
    let model = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(id, decided_by = auth_user.user_id, status = %next, "Host request decided");

    Ok(Json(HostRequestResponse::from(model)))
}
