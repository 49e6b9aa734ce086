use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::eligibility::{self, ParticipantAction};
use common::team::{self, MemberDraft};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{registration, team_member, track};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::registration::{RegisterForHackathonRequest, RegistrationResponse};
use crate::state::AppState;
use crate::utils::hackathon::{
    check_hackathon_access, find_hackathon, find_hackathon_for_update, find_registration,
    load_tracks, snapshot, team_rules,
};

#[utoipa::path(
    post,
    path = "/{id}/register",
    tag = "Registrations",
    operation_id = "registerForHackathon",
    summary = "Register for a hackathon",
    description = "Registers the caller (individually or with a team) while the registration \
        window is open. Field-level team problems are returned together with status 422.",
    params(("id" = i32, Path, description = "Hackathon ID")),
    request_body = RegisterForHackathonRequest,
    responses(
        (status = 201, description = "Registered", body = RegistrationResponse),
        (status = 400, description = "Registration window closed (INELIGIBLE_WINDOW)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Hackathon not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already registered (ALREADY_REGISTERED)", body = ErrorBody),
        (status = 422, description = "Team composition problems (TEAM_COMPOSITION)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(hackathon_id))]
pub async fn register_for_hackathon(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
    AppJson(payload): AppJson<RegisterForHackathonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let now = chrono::Utc::now();
    let txn = state.db.begin().await?;
    let model = find_hackathon_for_update(&txn, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;

    let already = find_registration(&txn, hackathon_id, auth_user.user_id)
        .await?
        .is_some();
    let action = eligibility::evaluate(&snapshot(&model), auth_user.user_id, already, None, now);
    match action {
        ParticipantAction::Register => {}
        _ if already => return Err(AppError::AlreadyRegistered),
        ParticipantAction::ManageAsOrganizer => {
            return Err(AppError::IneligibleWindow(
                "Organizers cannot register for their own hackathon".into(),
            ));
        }
        _ => {
            return Err(AppError::IneligibleWindow(
                "Registration is not open for this hackathon".into(),
            ));
        }
    }

    let tracks = load_tracks(&txn, hackathon_id).await?;
    let track_names: Vec<String> = tracks.iter().map(|t| t.name.clone()).collect();
    let registrant = MemberDraft {
        name: auth_user.username.clone(),
        email: payload.email.clone(),
    };

    let draft = team::validate(
        &team_rules(&model),
        &track_names,
        &registrant,
        &payload.to_input(),
    )
    .map_err(AppError::TeamComposition)?;

    let track_id = draft
        .track
        .as_deref()
        .and_then(|name| tracks.iter().find(|t| t.name == name))
        .map(|t| t.id);

    let new_registration = registration::ActiveModel {
        hackathon_id: Set(hackathon_id),
        user_id: Set(auth_user.user_id),
        kind: Set(draft.kind.as_str().to_string()),
        team_name: Set(draft.team_name.clone()),
        track_id: Set(track_id),
        registered_at: Set(now),
        ..Default::default()
    };

    let reg = match new_registration.insert(&txn).await {
        Ok(m) => m,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::AlreadyRegistered);
        }
        Err(e) => return Err(e.into()),
    };

    // Leader first; display order follows insertion order.
    let mut members = Vec::with_capacity(draft.members.len());
    for m in &draft.members {
        let new_member = team_member::ActiveModel {
            registration_id: Set(reg.id),
            name: Set(m.name.clone()),
            email: Set(m.email.clone()),
            role: Set(m.role.as_str().to_string()),
            ..Default::default()
        };
        members.push(new_member.insert(&txn).await?);
    }

    txn.commit().await?;

    tracing::info!(
        hackathon_id,
        user_id = auth_user.user_id,
        kind = %draft.kind,
        team_size = members.len(),
        "Registered for hackathon"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from_model(reg, members, draft.track)),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}/registration",
    tag = "Registrations",
    operation_id = "getMyRegistration",
    summary = "Get the caller's registration for a hackathon",
    params(("id" = i32, Path, description = "Hackathon ID")),
    responses(
        (status = 200, description = "Registration details", body = RegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not registered or hackathon not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(hackathon_id))]
pub async fn get_my_registration(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(hackathon_id): Path<i32>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let model = find_hackathon(&state.db, hackathon_id).await?;
    check_hackathon_access(&auth_user, &model)?;

    let reg = find_registration(&state.db, hackathon_id, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not registered for this hackathon".into()))?;

    let members = team_member::Entity::find()
        .filter(team_member::Column::RegistrationId.eq(reg.id))
        .order_by_asc(team_member::Column::Id)
        .all(&state.db)
        .await?;

    let track_name = match reg.track_id {
        Some(track_id) => track::Entity::find_by_id(track_id)
            .one(&state.db)
            .await?
            .map(|t| t.name),
        None => None,
    };

    Ok(Json(RegistrationResponse::from_model(
        reg, members, track_name,
    )))
}
