//! Route definitions for the `/role` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::role;
use crate::state::AppState;

/// Routes for role administration.
///
/// All routes require the privileged role (enforced by handler extractors).
///
/// ```text
/// GET    /role            -> list_roles
/// POST   /role            -> create_role
/// PUT    /role            -> update_role
/// DELETE /role?id={id}    -> delete_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/role",
        get(role::list_roles)
            .post(role::create_role)
            .put(role::update_role)
            .delete(role::delete_role),
    )
}
