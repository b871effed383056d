use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use log::warn;
use std::sync::Arc;

use crate::core::messages::catalog;
use crate::core::state::AppState;
use crate::security::jwt::extract_bearer_token;

/// Extract and validate the bearer token, adding the claims to the request
/// extensions. Requests without a valid token never reach the handler.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token);

    let Some(token) = token else {
        return unauthorized();
    };

    match state.jwt.verify(token).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            warn!("Rejected bearer token: {e}");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "message": catalog().unauthorized,
            "status": 401
        })),
    )
        .into_response()
}
