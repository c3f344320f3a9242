//! Stats API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::Stats;
use crate::AppState;

/// GET /api/stats - Platform summary statistics.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Stats> {
    let revision_id = state.store.revision_id().await;

    success(state.store.stats().await, revision_id)
}
