use axum::Json;
use axum::extract::{Path, State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::platform_config;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::admin::{
    ConfigEntryResponse, ConfigListResponse, UpsertConfigRequest, validate_config_key,
    validate_config_value,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/config",
    tag = "Admin",
    operation_id = "listConfig",
    summary = "List platform configuration (admin only)",
    responses(
        (status = 200, description = "Configuration entries", body = ConfigListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_config(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ConfigListResponse>, AppError> {
    auth_user.require_admin()?;

    let data = platform_config::Entity::find()
        .order_by_asc(platform_config::Column::Key)
        .all(&state.db)
        .await?
        .into_iter()
        .map(ConfigEntryResponse::from)
        .collect();

    Ok(Json(ConfigListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/config/{key}",
    tag = "Admin",
    operation_id = "getConfig",
    summary = "Get a configuration entry (admin only)",
    params(("key" = String, Path, description = "Config key")),
    responses(
        (status = 200, description = "Configuration entry", body = ConfigEntryResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Unknown key (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(key = %key))]
pub async fn get_config(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ConfigEntryResponse>, AppError> {
    auth_user.require_admin()?;

    let model = platform_config::Entity::find_by_id(key.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No config entry '{key}'")))?;

    Ok(Json(ConfigEntryResponse::from(model)))
}

#[utoipa::path(
    put,
    path = "/config/{key}",
    tag = "Admin",
    operation_id = "upsertConfig",
    summary = "Create or update a configuration entry (admin only)",
    description = "Sets a configuration value. Well-known keys are validated; the creation fee \
        must parse as a non-negative integer.",
    params(("key" = String, Path, description = "Config key")),
    request_body = UpsertConfigRequest,
    responses(
        (status = 200, description = "Entry upserted", body = ConfigEntryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(key = %key))]
pub async fn upsert_config(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    AppJson(payload): AppJson<UpsertConfigRequest>,
) -> Result<Json<ConfigEntryResponse>, AppError> {
    auth_user.require_admin()?;
    validate_config_key(&key)?;
    validate_config_value(&key, &payload.value)?;

    let txn = state.db.begin().await?;
    let model = match platform_config::Entity::find_by_id(key.as_str()).one(&txn).await? {
        Some(existing) => {
            let mut active: platform_config::ActiveModel = existing.into();
            active.value = Set(payload.value.clone());
            if let Some(description) = payload.description.clone() {
                active.description = Set(description);
            }
            active.update(&txn).await?
        }
        None => {
            let new_entry = platform_config::ActiveModel {
                key: Set(key.clone()),
                value: Set(payload.value.clone()),
                description: Set(payload.description.clone().unwrap_or_default()),
            };
            new_entry.insert(&txn).await?
        }
    };
    txn.commit().await?;

    tracing::info!(key = %key, user_id = auth_user.user_id, "Platform config updated");

    Ok(Json(ConfigEntryResponse::from(model)))
}
