//! API Routes for Larder
//!
//! This module combines all API routes into a single router.
//!
//! Route structure:
//! - /auth/* - Session user (login/logout/me)
//! - /foods/* - Inventory CRUD, stats, expiring window
//! - /advice/:kind - AI advice text
//! - /health, /status - Health checks (public)

mod advice;
mod auth;
mod foods;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health and status endpoints (public)
        .merge(status::routes())
        // Session user routes
        .nest("/auth", auth::routes())
        // Inventory routes
        .nest("/foods", foods::routes())
        // Advice routes
        .nest("/advice", advice::routes())
}

/// Resolve the session user or reject with 401.
///
/// The tracker runs a single-session model: whoever is stored as the
/// current user is the caller.
pub(crate) async fn require_user(state: &AppState) -> crate::Result<larder_models::User> {
    state
        .store
        .current_user()
        .await
        .ok_or(crate::Error::Unauthenticated)
}
