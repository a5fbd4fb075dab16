//! Handlers for the `/role` resource.
//!
//! All handlers require the privileged role via [`RequireAdmin`]. Consistency
//! rules live in [`rolegate_core::role_service::RoleService`]; these handlers
//! only pick the status code.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rolegate_core::role::RoleDto;
use rolegate_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query string for `DELETE /role?id=<id>`.
#[derive(Debug, Deserialize)]
pub struct DeleteRoleParams {
    pub id: DbId,
}

/// GET /role
///
/// List every role with its member usernames.
pub async fn list_roles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RoleDto>>> {
    let roles = state.roles.list().await?;
    tracing::debug!(count = roles.len(), "Listed roles");
    Ok(Json(roles.iter().map(RoleDto::from).collect()))
}

/// POST /role
///
/// Create a role. Any `id` in the body is ignored. Returns 201 with the
/// persisted role.
pub async fn create_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RoleDto>,
) -> AppResult<(StatusCode, Json<RoleDto>)> {
    let role = state.roles.create(input).await?;
    Ok((StatusCode::CREATED, Json(RoleDto::from(role))))
}

/// PUT /role
///
/// Replace the name and members of the role identified by the body's `id`.
pub async fn update_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RoleDto>,
) -> AppResult<Json<RoleDto>> {
    let role = state.roles.update(input).await?;
    Ok(Json(RoleDto::from(role)))
}

/// DELETE /role?id=<id>
///
/// Delete a role. Returns 204 whether or not the role existed.
pub async fn delete_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DeleteRoleParams>,
) -> AppResult<StatusCode> {
    state.roles.delete(params.id).await?;
    tracing::info!(
        role_id = params.id,
        caller = %admin.subject,
        "Role delete requested via API"
    );
    Ok(StatusCode::NO_CONTENT)
}
