//! Vote API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::models::{Answer, Question, VoteRequest};
use crate::AppState;

/// POST /api/questions/:id/votes - Vote on a question. The delta is +1 or
/// -1 by convention; it is applied as sent.
pub async fn vote_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<Question> {
    let revision_id = state.store.revision_id().await;

    match state.store.vote_question(&question_id, request.delta).await {
        Ok(question) => {
            let new_revision = state.store.revision_id().await;
            success(question, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/questions/:id/answers/:answer_id/votes - Vote on an answer.
pub async fn vote_answer(
    State(state): State<AppState>,
    Path((question_id, answer_id)): Path<(String, String)>,
    Json(request): Json<VoteRequest>,
) -> ApiResult<Answer> {
    let revision_id = state.store.revision_id().await;

    match state
        .store
        .vote_answer(&question_id, &answer_id, request.delta)
        .await
    {
        Ok(answer) => {
            let new_revision = state.store.revision_id().await;
            success(answer, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
