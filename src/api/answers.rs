//! Answer API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Answer, CreateAnswerRequest};
use crate::AppState;

/// POST /api/questions/:id/answers - Post an answer to a question.
pub async fn create_answer(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    Json(request): Json<CreateAnswerRequest>,
) -> ApiResult<Answer> {
    let revision_id = state.store.revision_id().await;

    // Validate required fields
    if request.body.trim().is_empty() {
        return error(
            AppError::Validation("Answer body is required".to_string()),
            revision_id,
        );
    }

    match state.store.add_answer(&question_id, request.body).await {
        Ok(answer) => {
            let new_revision = state.store.revision_id().await;
            success(answer, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/questions/:id/answers/:answer_id/accept - Accept an answer.
/// Only the question's author may accept; siblings are unmarked first.
pub async fn accept_answer(
    State(state): State<AppState>,
    Path((question_id, answer_id)): Path<(String, String)>,
) -> ApiResult<Answer> {
    let revision_id = state.store.revision_id().await;

    match state.store.accept_answer(&question_id, &answer_id).await {
        Ok(answer) => {
            let new_revision = state.store.revision_id().await;
            success(answer, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
