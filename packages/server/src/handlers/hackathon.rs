use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::HostApprovalStatus;
use common::creation::{self, CreationDecision};
use common::eligibility;
use common::lifecycle;
use common::platform_config::{CREATION_FEE_KEY, DEFAULT_CREATION_FEE};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{hackathon, platform_config, submission, track};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::hackathon::*;
use crate::models::shared::{Pagination, escape_like};
use crate::state::AppState;
use crate::utils::hackathon::{
    check_hackathon_access, content_checklist, find_hackathon, find_hackathon_for_update,
    find_registration, load_tracks, snapshot, submission_snapshot,
};
use crate::utils::host::approval_status;

#[utoipa::path(
    post,
    path = "/",
    tag = "Hackathons",
    operation_id = "createHackathon",
    summary = "Create a hackathon (approved hosts only)",
    description = "Creates a hackathon in Draft status. When the platform charges a creation fee, \
        returns 402 with the amount instead; pay the fee and call confirmCreation with the receipt.",
    request_body = CreateHackathonRequest,
    responses(
        (status = 201, description = "Hackathon created", body = HackathonResponse),
        (status = 400, description = "Validation error or incomplete draft (VALIDATION_ERROR, INCOMPLETE_DRAFT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 402, description = "Creation fee must be paid first", body = PaymentRequiredResponse),
        (status = 403, description = "Host not approved (HOST_NOT_APPROVED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_hackathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateHackathonRequest>,
) -> Result<Response, AppError> {
    validate_create_hackathon(&payload)?;

    let approval = caller_approval(&state.db, &auth_user).await?;
    let fee = creation_fee(&state.db).await?;

    match creation::request_creation(approval, &payload.to_draft(), fee)? {
        CreationDecision::PaymentRequired { amount } => Ok((
            StatusCode::PAYMENT_REQUIRED,
            Json(PaymentRequiredResponse {
                amount,
                message: "A creation fee is required; confirm with a payment receipt".into(),
            }),
        )
            .into_response()),
        CreationDecision::Proceed => {
            let response = persist_hackathon(&state.db, &auth_user, &payload, None).await?;
            Ok((StatusCode::CREATED, Json(response)).into_response())
        }
    }
}

#[utoipa::path(
    post,
    path = "/confirm",
    tag = "Hackathons",
    operation_id = "confirmCreation",
    summary = "Confirm a fee-gated creation with a payment receipt",
    request_body = ConfirmCreateHackathonRequest,
    responses(
        (status = 201, description = "Hackathon created", body = HackathonResponse),
        (status = 400, description = "Validation error, incomplete draft, or invalid receipt (VALIDATION_ERROR, INCOMPLETE_DRAFT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Host not approved (HOST_NOT_APPROVED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.hackathon.title))]
pub async fn confirm_creation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ConfirmCreateHackathonRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_hackathon(&payload.hackathon)?;

    let approval = caller_approval(&state.db, &auth_user).await?;
    creation::confirm_creation(approval, &payload.hackathon.to_draft(), &payload.receipt)?;

    let response = persist_hackathon(
        &state.db,
        &auth_user,
        &payload.hackathon,
        Some(&payload.receipt),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Hackathons",
    operation_id = "listHackathons",
    summary = "List hackathons with pagination and search",
    description = "Admins see all hackathons; everyone else sees visible ones (Published, Live, \
        Completed) plus their own.",
    params(HackathonListQuery),
    responses(
        (status = 200, description = "List of hackathons", body = HackathonListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn list_hackathons(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<HackathonListQuery>,
) -> Result<Json<HackathonListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = hackathon::Entity::find();

    if !auth_user.actor().is_admin() {
        let visible: Vec<String> = common::HackathonStatus::ALL
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| s.as_str().to_string())
            .collect();
        select = select.filter(
            Condition::any()
                .add(hackathon::Column::Status.is_in(visible))
                .add(hackathon::Column::OrganizerId.eq(auth_user.user_id)),
        );
    }

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(hackathon::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by_desc(hackathon::Column::CreatedAt)
        .select_only()
        .column(hackathon::Column::Id)
        .column(hackathon::Column::Title)
        .column(hackathon::Column::Category)
        .column(hackathon::Column::Status)
        .column(hackathon::Column::OrganizerId)
        .column(hackathon::Column::RegistrationEnd)
        .column(hackathon::Column::StartDate)
        .column(hackathon::Column::EndDate)
        .column(hackathon::Column::CreatedAt)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .into_model::<HackathonListItem>()
        .all(&state.db)
        .await?;

    Ok(Json(HackathonListResponse {
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
    get,
    path = "/{id}",
    tag = "Hackathons",
    operation_id = "getHackathon",
    summary = "Get a hackathon by ID",
    description = "Returns full hackathon details including tracks. Hidden hackathons return 404 \
        (not 403) to prevent enumeration.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    responses(
        (status = 200, description = "Hackathon details", body = HackathonResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_hackathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<HackathonResponse>, AppError> {
    let model = find_hackathon(&state.db, id).await?;
    check_hackathon_access(&auth_user, &model)?;
    let tracks = load_tracks(&state.db, id).await?;
    Ok(Json(HackathonResponse::from_model(model, tracks)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Hackathons",
    operation_id = "updateHackathon",
    summary = "Update hackathon content",
    description = "Partially updates a hackathon using PATCH semantics. Only the organizer or an \
        admin may edit, and only while the hackathon is not in a terminal status. Date changes \
        are validated against the effective combined schedule.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    request_body = UpdateHackathonRequest,
    responses(
        (status = 200, description = "Hackathon updated", body = HackathonResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Hackathon is in a terminal status (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_hackathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateHackathonRequest>,
) -> Result<Json<HackathonResponse>, AppError> {
    validate_update_hackathon(&payload)?;

    if payload == UpdateHackathonRequest::default() {
        let existing = find_hackathon(&state.db, id).await?;
        check_hackathon_access(&auth_user, &existing)?;
        let tracks = load_tracks(&state.db, id).await?;
        return Ok(Json(HackathonResponse::from_model(existing, tracks)));
    }

    let txn = state.db.begin().await?;
    let existing = find_hackathon_for_update(&txn, id).await?;
    check_hackathon_access(&auth_user, &existing)?;

    if existing.organizer_id != auth_user.user_id && !auth_user.actor().is_admin() {
        return Err(AppError::PermissionDenied);
    }
    if existing.status.is_terminal() {
        return Err(AppError::Conflict(
            "Hackathon is in a terminal status and cannot be edited".into(),
        ));
    }

    validate_effective_dates(&payload, &existing)?;

    let mut active: hackathon::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(ref category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(registration_start) = payload.registration_start {
        active.registration_start = Set(registration_start);
    }
    if let Some(registration_end) = payload.registration_end {
        active.registration_end = Set(registration_end);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(submission_deadline) = payload.submission_deadline {
        active.submission_deadline = Set(submission_deadline);
    }
    if let Some(banner_url) = payload.banner_url {
        active.banner_url = Set(Some(banner_url));
    }
    if let Some(logo_url) = payload.logo_url {
        active.logo_url = Set(Some(logo_url));
    }
    if let Some(rules) = payload.rules {
        active.rules = Set(Some(rules));
    }
    if let Some(dataset_url) = payload.dataset_url {
        active.dataset_url = Set(Some(dataset_url));
    }
    if let Some(contact_email) = payload.contact_email {
        active.contact_email = Set(Some(contact_email));
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    let tracks = load_tracks(&txn, id).await?;
    txn.commit().await?;

    Ok(Json(HackathonResponse::from_model(model, tracks)))
}

#[utoipa::path(
    post,
    path = "/{id}/status",
    tag = "Hackathons",
    operation_id = "transitionHackathon",
    summary = "Transition a hackathon to a new lifecycle status",
    description = "Applies a lifecycle transition. Only the organizer or an admin may transition; \
        only an admin may reject. Publishing or going live requires banner, logo, rules, and at \
        least one track.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Status changed", body = HackathonResponse),
        (status = 400, description = "Mandatory content missing (INCOMPLETE_HACKATHON)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Edge not permitted (INVALID_TRANSITION)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id, target = %payload.target))]
pub async fn transition_hackathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<TransitionRequest>,
) -> Result<Json<HackathonResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_hackathon_for_update(&txn, id).await?;
    check_hackathon_access(&auth_user, &existing)?;

    let tracks = load_tracks(&txn, id).await?;
    let checklist = content_checklist(&existing, tracks.len());

    let next = lifecycle::transition(
        existing.status,
        payload.target,
        &auth_user.actor(),
        existing.organizer_id,
        &checklist,
    )?;

    let from = existing.status;
    let mut active: hackathon::ActiveModel = existing.into();
    active.status = Set(next);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(id, %from, to = %next, user_id = auth_user.user_id, "Hackathon status changed");

    Ok(Json(HackathonResponse::from_model(model, tracks)))
}

#[utoipa::path(
    get,
    path = "/{id}/eligibility",
    tag = "Hackathons",
    operation_id = "getEligibility",
    summary = "Get the caller's current participation action",
    description = "Evaluates what the caller can do with this hackathon right now, e.g. Register, \
        SubmitProject, or ViewResults.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    responses(
        (status = 200, description = "Current action", body = EligibilityResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_eligibility(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let model = find_hackathon(&state.db, id).await?;
    check_hackathon_access(&auth_user, &model)?;

    let registration = find_registration(&state.db, id, auth_user.user_id).await?;
    let submission = match &registration {
        Some(reg) => submission::Entity::find()
            .filter(submission::Column::RegistrationId.eq(reg.id))
            .one(&state.db)
            .await?
            .map(|s| submission_snapshot(&s)),
        None => None,
    };

    let action = eligibility::evaluate(
        &snapshot(&model),
        auth_user.user_id,
        registration.is_some(),
        submission.as_ref(),
        chrono::Utc::now(),
    );

    Ok(Json(EligibilityResponse { action }))
}

/// Approval status that gates creation for this caller. Admins pass the gate.
async fn caller_approval(
    db: &DatabaseConnection,
    auth_user: &AuthUser,
) -> Result<HostApprovalStatus, AppError> {
    if auth_user.actor().is_admin() {
        return Ok(HostApprovalStatus::Approved);
    }
    approval_status(db, auth_user.user_id).await
}

/// Configured creation fee. A malformed value is a deployment error, not a
/// reason to silently waive the fee.
async fn creation_fee(db: &DatabaseConnection) -> Result<u64, AppError> {
    let raw = platform_config::Entity::find_by_id(CREATION_FEE_KEY)
        .one(db)
        .await?
        .map(|row| row.value)
        .unwrap_or_else(|| DEFAULT_CREATION_FEE.to_string());
    common::platform_config::parse_fee(&raw)
        .map_err(|_| AppError::Internal(format!("Malformed {CREATION_FEE_KEY} config: '{raw}'")))
}

async fn persist_hackathon(
    db: &DatabaseConnection,
    auth_user: &AuthUser,
    payload: &CreateHackathonRequest,
    receipt: Option<&common::creation::PaymentReceipt>,
) -> Result<HackathonResponse, AppError> {
    let now = chrono::Utc::now();
    let txn = db.begin().await?;

    let new_hackathon = hackathon::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        category: Set(payload.category.trim().to_string()),
        description: Set(payload.description.clone()),
        status: Set(common::HackathonStatus::Draft),
        organizer_id: Set(auth_user.user_id),
        registration_start: Set(payload.registration_start),
        registration_end: Set(payload.registration_end),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        submission_deadline: Set(payload.submission_deadline),
        min_team_size: Set(payload.min_team_size as i32),
        max_team_size: Set(payload.max_team_size as i32),
        allow_individual: Set(payload.allow_individual),
        banner_url: Set(payload.banner_url.clone()),
        logo_url: Set(payload.logo_url.clone()),
        rules: Set(payload.rules.clone()),
        dataset_url: Set(payload.dataset_url.clone()),
        contact_email: Set(payload.contact_email.clone()),
        payment_id: Set(receipt.map(|r| r.payment_id.trim().to_string())),
        provider_payment_id: Set(receipt.map(|r| r.provider_payment_id.trim().to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_hackathon.insert(&txn).await?;

    let mut tracks = Vec::with_capacity(payload.tracks.len());
    for (i, name) in payload.tracks.iter().enumerate() {
        let new_track = track::ActiveModel {
            hackathon_id: Set(model.id),
            name: Set(name.trim().to_string()),
            position: Set(i as i32),
            ..Default::default()
        };
        tracks.push(new_track.insert(&txn).await?);
    }

    txn.commit().await?;

    tracing::info!(
        id = model.id,
        organizer_id = auth_user.user_id,
        paid = receipt.is_some(),
        "Hackathon created"
    );

    Ok(HackathonResponse::from_model(model, tracks))
}
