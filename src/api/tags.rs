//! Tag API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::models::{Question, TagCount};
use crate::AppState;

/// GET /api/tags - List all tags with live question counts, most used
/// first.
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Vec<TagCount>> {
    let revision_id = state.store.revision_id().await;

    success(state.store.all_tags().await, revision_id)
}

/// GET /api/tags/:name/questions - List the questions carrying a tag.
pub async fn questions_by_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<Question>> {
    let revision_id = state.store.revision_id().await;

    success(state.store.questions_by_tag(&name).await, revision_id)
}
