//! API Router
//!
//! Combines the public routes with the token-protected task and session
//! routes into the service router.

use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;

use crate::core::health::health_check;
use crate::core::state::AppState;
use crate::security::require_auth;

/// Configure all API routes. Everything except `/health`, `/api/register`
/// and `/api/login` sits behind the bearer-token middleware.
pub fn configure_api_routes(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .merge(crate::auth::configure_public_auth_routes());

    let protected = Router::new()
        .merge(crate::tasks::configure_task_routes())
        .merge(crate::auth::configure_protected_auth_routes())
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_auth,
        ));

    public.merge(protected).with_state(state)
}
