pub mod health;
pub mod role;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /health                GET     (public)
/// /role                  GET, POST, PUT, DELETE?id=  (privileged role)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(role::router())
}
