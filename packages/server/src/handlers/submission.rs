use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::eligibility::{self, ParticipantAction, may_edit_submission};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{registration, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::submission::{
    SubmissionRequest, SubmissionResponse, validate_submission_request,
};
use crate::state::AppState;
use crate::utils::hackathon::{
    check_hackathon_access, find_hackathon, find_hackathon_for_update, find_registration,
    snapshot, submission_snapshot,
};

#[utoipa::path(
    post,
    path = "/{id}/submission",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a project (or save a draft)",
    description = "Creates the caller's submission for this hackathon. Only possible while the \
        submission window is open, exactly when the eligibility endpoint offers SubmitProject. \
        Each registration has exactly one submission; edit it afterwards instead of creating \
        another.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    request_body = SubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = SubmissionResponse),
        (status = 400, description = "Window not open (INELIGIBLE_WINDOW, VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Hackathon not found or not registered (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Submission already exists (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(hackathon_id))]
pub async fn create_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
    AppJson(payload): AppJson<SubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_submission_request(&payload)?;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let model = find_hackathon_for_update(&txn, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;
    let reg = require_registration(&txn, hackathon_id, auth_user.user_id).await?;

    // The same decision the eligibility endpoint serves: a surface that
    // offers "Submit" must not 400 on the POST.
    let action = eligibility::evaluate(&snapshot(&model), auth_user.user_id, true, None, now);
    if action != ParticipantAction::SubmitProject {
        return Err(AppError::IneligibleWindow(
            "The submission window is not open".into(),
        ));
    }

    let new_submission = submission::ActiveModel {
        registration_id: Set(reg.id),
        repo_url: Set(payload.repo_url.trim().to_string()),
        demo_url: Set(payload.demo_url.clone()),
        description: Set(payload.description.clone()),
        is_draft: Set(payload.is_draft),
        submitted_at: Set((!payload.is_draft).then_some(now)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_submission.insert(&txn).await {
        Ok(m) => m,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::Conflict(
                "A submission already exists; edit it instead".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };
    txn.commit().await?;

    tracing::info!(
        hackathon_id,
        user_id = auth_user.user_id,
        draft = model.is_draft,
        "Submission created"
    );

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}/submission",
    tag = "Submissions",
    operation_id = "updateSubmission",
    summary = "Edit the caller's submission",
    description = "Replaces the submission's content. Allowed until the deadline; after it, only \
        a draft that was never finalized remains editable. Setting is_draft to false finalizes.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    request_body = SubmissionRequest,
    responses(
        (status = 200, description = "Submission updated", body = SubmissionResponse),
        (status = 400, description = "No longer editable (INELIGIBLE_WINDOW, VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No submission, not registered, or hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Finalized submission cannot revert to draft (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(hackathon_id))]
pub async fn update_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
    AppJson(payload): AppJson<SubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    validate_submission_request(&payload)?;

    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let model = find_hackathon_for_update(&txn, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;
    let reg = require_registration(&txn, hackathon_id, auth_user.user_id).await?;
    let existing = require_submission(&txn, reg.id).await?;

    if !may_edit_submission(&snapshot(&model), &submission_snapshot(&existing), now) {
        return Err(AppError::IneligibleWindow(
            "The submission can no longer be edited".into(),
        ));
    }
    if !existing.is_draft && payload.is_draft {
        return Err(AppError::Conflict(
            "A finalized submission cannot revert to draft".into(),
        ));
    }

    let finalizing = existing.is_draft && !payload.is_draft;
    let mut active: submission::ActiveModel = existing.into();
    active.repo_url = Set(payload.repo_url.trim().to_string());
    active.demo_url = Set(payload.demo_url.clone());
    active.description = Set(payload.description.clone());
    if finalizing {
        active.is_draft = Set(false);
        active.submitted_at = Set(Some(now));
    }
    active.updated_at = Set(now);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(SubmissionResponse::from(model)))
}

#[utoipa::path(
    post,
    path = "/{id}/submission/finalize",
    tag = "Submissions",
    operation_id = "finalizeSubmission",
    summary = "Finalize a draft submission",
    params(("id" = i32, Path, description = "Hackathon ID")),
    responses(
        (status = 200, description = "Submission finalized", body = SubmissionResponse),
        (status = 400, description = "No longer editable (INELIGIBLE_WINDOW)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No submission, not registered, or hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already finalized (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(hackathon_id))]
pub async fn finalize_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let model = find_hackathon_for_update(&txn, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;
    let reg = require_registration(&txn, hackathon_id, auth_user.user_id).await?;
    let existing = require_submission(&txn, reg.id).await?;

    if !existing.is_draft {
        return Err(AppError::Conflict("Submission is already finalized".into()));
    }
    if !may_edit_submission(&snapshot(&model), &submission_snapshot(&existing), now) {
        return Err(AppError::IneligibleWindow(
            "The submission can no longer be finalized".into(),
        ));
    }

    let mut active: submission::ActiveModel = existing.into();
    active.is_draft = Set(false);
    active.submitted_at = Set(Some(now));
    active.updated_at = Set(now);

    let model = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        hackathon_id,
        user_id = auth_user.user_id,
        "Submission finalized"
    );

    Ok(Json(SubmissionResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/{id}/submission",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get the caller's submission",
    params(("id" = i32, Path, description = "Hackathon ID")),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No submission, not registered, or hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(hackathon_id))]
pub async fn get_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let model = find_hackathon(&state.db, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;
    let reg = require_registration(&state.db, hackathon_id, auth_user.user_id).await?;
    let existing = require_submission(&state.db, reg.id).await?;
    Ok(Json(SubmissionResponse::from(existing)))
}

async fn require_registration<C: ConnectionTrait>(
    db: &C,
    hackathon_id: i32,
    user_id: i32,
) -> Result<registration::Model, AppError> {
    find_registration(db, hackathon_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this hackathon".into()))
}

async fn require_submission<C: ConnectionTrait>(
    db: &C,
    registration_id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find()
        .filter(submission::Column::RegistrationId.eq(registration_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("No submission for this hackathon yet".into()))
}
