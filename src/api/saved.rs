//! Saved-question API endpoints.

use axum::extract::{Path, State};
use serde::Serialize;

use super::{error, success, ApiResult};
use crate::AppState;

/// GET /api/saved - The saved-question ids, in save order.
pub async fn list_saved(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let revision_id = state.store.revision_id().await;

    success(state.store.saved_question_ids().await, revision_id)
}

/// Membership after a toggle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSavedResponse {
    pub question_id: String,
    pub saved: bool,
}

/// POST /api/saved/:question_id/toggle - Flip a question's membership in
/// the saved set. The new set is mirrored to the durable slot before the
/// response is sent.
pub async fn toggle_saved(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> ApiResult<ToggleSavedResponse> {
    let revision_id = state.store.revision_id().await;

    match state.store.toggle_saved(&question_id).await {
        Ok(saved) => {
            let new_revision = state.store.revision_id().await;
            success(
                ToggleSavedResponse { question_id, saved },
                new_revision,
            )
        }
        Err(e) => error(e, revision_id),
    }
}
