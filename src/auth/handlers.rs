//! HTTP handlers for account registration and token issuance
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use log::{error, info};
use std::sync::Arc;

use crate::auth::error::AuthApiError;
use crate::auth::types::{LoginPayload, LoginResponse, RegisterPayload, RegisterResponse, UserDraft};
use crate::auth::validation::{validate_login, validate_register};
use crate::core::messages::catalog;
use crate::core::state::AppState;
use crate::security::{hash_password, verify_password, Claims};

pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, AuthApiError> {
    let draft = validate_register(&payload).map_err(AuthApiError::Validation)?;

    if state.users.find_by_email(&draft.email).await?.is_some() {
        return Err(AuthApiError::EmailTaken);
    }

    let password_hash = hash_password(&draft.password).map_err(|e| {
        error!("Failed to hash password: {e}");
        AuthApiError::Database
    })?;

    let user = state
        .users
        .insert(UserDraft {
            name: draft.name,
            email: draft.email,
            password_hash,
        })
        .await?;

    info!("Registered user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: catalog().user_registered.clone(),
            user: user.into(),
            status: 201,
        }),
    )
        .into_response())
}

pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let (email, password) = validate_login(&payload).map_err(AuthApiError::Validation)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let password_ok = verify_password(&password, &user.password_hash).map_err(|e| {
        error!("Password verification failed for {}: {e}", user.id);
        AuthApiError::Database
    })?;
    if !password_ok {
        return Err(AuthApiError::InvalidCredentials);
    }

    let issued = state
        .jwt
        .issue(user.id, Some(user.email.clone()))
        .map_err(|e| {
            error!("Failed to issue token for {}: {e}", user.id);
            AuthApiError::Database
        })?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
        status: 200,
    }))
}

/// Revoke the presented token. The auth middleware has already verified it
/// and stashed the claims in the request extensions.
pub async fn handle_logout(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Json<serde_json::Value> {
    state.jwt.revoke(&claims.jti).await;
    info!("User {} logged out", claims.sub);
    Json(serde_json::json!({
        "message": catalog().logged_out,
        "status": 200
    }))
}

/// Routes reachable without a bearer token.
pub fn configure_public_auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/register", post(handle_register))
        .route("/api/login", post(handle_login))
}

/// Routes that sit behind the auth middleware.
pub fn configure_protected_auth_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/logout", post(handle_logout))
}
