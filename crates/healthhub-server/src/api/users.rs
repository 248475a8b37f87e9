//! `/users` handlers.
//!
//! ```text
//! GET /users                   -> [User]
//! GET /users/count             -> {"count": n}
//! GET /users/new-this-month    -> {"count": n}
//! GET /users/active-this-week  -> {"count": n}
//! GET /users/growth            -> {"series": [{"period": "YYYY-MM", "count": n}]}
//! GET /users/activity-stats    -> {"totalUsers", "newThisMonth", "activeThisWeek", "growth"}
//! ```

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use healthhub_core::UserView;

use crate::api::ApiResult;
use crate::app_state::AppState;
use crate::service::{ActivityStats, GrowthPoint};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub series: Vec<GrowthPoint>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/count", get(user_count))
        .route("/new-this-month", get(new_this_month))
        .route("/active-this-week", get(active_this_week))
        .route("/growth", get(growth))
        .route("/activity-stats", get(activity_stats))
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserView>>> {
    Ok(Json(state.metrics_service().all_users().await?))
}

pub async fn user_count(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.metrics_service().user_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn new_this_month(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.metrics_service().new_users_this_month().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn active_this_week(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.metrics_service().active_users_this_week().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn growth(State(state): State<AppState>) -> ApiResult<Json<GrowthResponse>> {
    let series = state.metrics_service().user_growth().await?;
    Ok(Json(GrowthResponse { series }))
}

pub async fn activity_stats(State(state): State<AppState>) -> ApiResult<Json<ActivityStats>> {
    Ok(Json(state.metrics_service().activity_stats().await?))
}
