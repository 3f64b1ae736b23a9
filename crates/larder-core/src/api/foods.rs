//! Food Routes
//!
//! CRUD and derived views over the inventory.
//!
//! Routes:
//! - GET /foods - List foods (optional status/category/text filters)
//! - POST /foods - Create a food record
//! - GET /foods/stats - Aggregate freshness counts
//! - GET /foods/expiring - Foods expiring within a window
//! - GET /foods/:id - Get one record
//! - PUT /foods/:id - Merge a partial update
//! - DELETE /foods/:id - Remove a record

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use larder_freshness::{ExpiryStats, FreshnessStatus};
use larder_models::{FoodCreate, FoodItem, FoodUpdate};

use crate::api::require_user;
use crate::{AppState, Error, Result};

/// Build food routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_foods).post(create_food))
        .route("/stats", get(food_stats))
        .route("/expiring", get(expiring_foods))
        .route(
            "/:food_id",
            get(get_food).put(update_food).delete(delete_food),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing foods.
#[derive(Debug, Deserialize, Default)]
pub struct ListFoodsQuery {
    /// Filter by freshness status
    pub status: Option<FreshnessStatus>,
    /// Filter by category (case-insensitive)
    pub category: Option<String>,
    /// Text match against name and category
    pub q: Option<String>,
}

/// Food list response.
#[derive(Debug, Serialize)]
pub struct FoodListResponse {
    pub foods: Vec<FoodItem>,
    pub total: usize,
}

/// Query parameters for the expiring window.
#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    /// Window in days (default 7, the "expiring this week" view)
    #[serde(default = "default_window_days")]
    pub days: i64,
}

fn default_window_days() -> i64 {
    7
}

/// Expiring list response.
#[derive(Debug, Serialize)]
pub struct ExpiringResponse {
    pub foods: Vec<FoodItem>,
    pub total: usize,
    pub window_days: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /foods
async fn list_foods(
    State(state): State<AppState>,
    Query(query): Query<ListFoodsQuery>,
) -> Result<Json<FoodListResponse>> {
    require_user(&state).await?;

    let now = Utc::now();
    let mut foods = state.store.list_foods().await;

    if let Some(status) = query.status {
        foods.retain(|f| f.status(now) == status);
    }
    if let Some(category) = &query.category {
        foods.retain(|f| f.category.eq_ignore_ascii_case(category));
    }
    if let Some(q) = &query.q {
        let needle = q.to_lowercase();
        foods.retain(|f| {
            f.name.to_lowercase().contains(&needle)
                || f.category.to_lowercase().contains(&needle)
        });
    }

    let total = foods.len();
    Ok(Json(FoodListResponse { foods, total }))
}

/// POST /foods
async fn create_food(
    State(state): State<AppState>,
    Json(draft): Json<FoodCreate>,
) -> Result<(StatusCode, Json<FoodItem>)> {
    let user = require_user(&state).await?;

    if draft.name.trim().is_empty() {
        return Err(Error::Validation("Food name must not be empty".to_string()));
    }

    let food = state.store.add_food(&user.id, draft).await?;
    Ok((StatusCode::CREATED, Json(food)))
}

/// GET /foods/stats
async fn food_stats(State(state): State<AppState>) -> Result<Json<ExpiryStats>> {
    require_user(&state).await?;

    let foods = state.store.list_foods().await;
    let stats = ExpiryStats::tally(foods.iter().map(|f| f.expiry_date), Utc::now());
    Ok(Json(stats))
}

/// GET /foods/expiring
async fn expiring_foods(
    State(state): State<AppState>,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<ExpiringResponse>> {
    require_user(&state).await?;

    if query.days < 0 {
        return Err(Error::InvalidInput(
            "days must not be negative".to_string(),
        ));
    }

    let now = Utc::now();
    let mut foods = state.store.list_foods().await;
    foods.retain(|f| larder_freshness::is_expiring_within(f.expiry_date, now, query.days));

    let total = foods.len();
    Ok(Json(ExpiringResponse {
        foods,
        total,
        window_days: query.days,
    }))
}

/// GET /foods/:id
async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<Json<FoodItem>> {
    require_user(&state).await?;

    let foods = state.store.list_foods().await;
    foods
        .into_iter()
        .find(|f| f.id == food_id)
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("Food {}", food_id)))
}

/// PUT /foods/:id
///
/// A missing id is a silent no-op by contract, so the response is 204
/// either way; the store's boolean only reaches the log.
async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    Json(update): Json<FoodUpdate>,
) -> Result<StatusCode> {
    require_user(&state).await?;

    let found = state.store.update_food(&food_id, update).await?;
    if !found {
        debug!(food_id = %food_id, "Update hit no record");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /foods/:id
async fn delete_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> Result<StatusCode> {
    require_user(&state).await?;

    let found = state.store.remove_food(&food_id).await?;
    if !found {
        debug!(food_id = %food_id, "Delete hit no record");
    }
    Ok(StatusCode::NO_CONTENT)
}
