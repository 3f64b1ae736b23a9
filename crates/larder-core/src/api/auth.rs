//! Auth Routes
//!
//! Session-user management. There is no password or token exchange: signing
//! in creates the user record and stores it as the single session user, the
//! way the tracker's local profile works.
//!
//! Routes:
//! - POST /auth/login - Create and store the session user
//! - GET /auth/me - Current session user
//! - POST /auth/logout - Clear the session user

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use larder_models::User;

use crate::api::require_user;
use crate::{AppState, Error, Result};

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Request to sign in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    /// Display name; defaults to the email local part.
    pub name: Option<String>,
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation("A valid email is required".to_string()));
    }

    let user = User::new(email, request.name);
    state.store.set_current_user(&user).await?;

    info!(user_id = %user.id, "Session user signed in");
    Ok(Json(user))
}

/// GET /auth/me
async fn me(State(state): State<AppState>) -> Result<Json<User>> {
    let user = require_user(&state).await?;
    Ok(Json(user))
}

/// POST /auth/logout
async fn logout(State(state): State<AppState>) -> Result<StatusCode> {
    state.store.clear_current_user().await?;
    Ok(StatusCode::NO_CONTENT)
}
