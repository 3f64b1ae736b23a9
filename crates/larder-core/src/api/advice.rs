//! Advice Routes
//!
//! AI-generated text derived from the current inventory. The relay gets one
//! complete prompt per request; when it fails, the response carries the
//! per-kind fallback message instead of an error, which is the behavior the
//! tracker's interface is built around.
//!
//! Routes:
//! - POST /advice/:kind - Generate advice text (recipes, nutrition,
//!   storage, meal_plan)

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::api::require_user;
use crate::services::advice::{self, AdviceKind};
use crate::{AppState, Error, Result};

/// Build advice routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/:kind", post(generate_advice))
}

/// Advice response.
#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    /// Generated text, or the empty-inventory / fallback message.
    pub text: String,
    /// Whether `text` came from the generation relay.
    pub generated: bool,
}

/// POST /advice/:kind
async fn generate_advice(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<AdviceResponse>> {
    let kind = AdviceKind::from_str(&kind).ok_or_else(|| {
        Error::InvalidInput(
            "kind must be one of: recipes, nutrition, storage, meal_plan".to_string(),
        )
    })?;

    require_user(&state).await?;

    let foods = state.store.list_foods().await;
    let Some(prompt) = advice::prompt_for(kind, &foods, Utc::now()) else {
        return Ok(Json(AdviceResponse {
            text: kind.empty_message().to_string(),
            generated: false,
        }));
    };

    match state.generator.generate(&prompt).await {
        Ok(text) => Ok(Json(AdviceResponse {
            text,
            generated: true,
        })),
        Err(e) => {
            warn!(kind = %kind, error = %e, "Generation failed, serving fallback");
            Ok(Json(AdviceResponse {
                text: kind.fallback_message().to_string(),
                generated: false,
            }))
        }
    }
}
