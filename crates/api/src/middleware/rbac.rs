//! Role-based access control extractor.
//!
//! [`RequireAdmin`] wraps [`AuthUser`] and rejects callers whose role set
//! does not contain the configured privileged role. It runs before the
//! request body is parsed, so unauthorized callers never reach handler logic.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rolegate_core::access;
use rolegate_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the privileged role (`ADMIN_ROLE`, default `ADMIN`).
/// Rejects with 401 without a valid token and 403 without the role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user holds the privileged role here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let required = state.config.admin_role.as_str();

        if !access::evaluate(&user.roles, required).is_allowed() {
            tracing::debug!(caller = %user.subject, required, "Access denied");
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "{required} role required"
            ))));
        }
        Ok(RequireAdmin(user))
    }
}
