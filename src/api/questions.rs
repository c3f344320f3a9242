//! Question API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateQuestionRequest, Question, QuestionSort};
use crate::AppState;

/// Query parameters for the question listing.
#[derive(Debug, Deserialize)]
pub struct ListQuestionsQuery {
    /// One of `newest`, `active`, `votes`, `unanswered`.
    #[serde(default)]
    pub sort: Option<String>,
}

/// GET /api/questions - List questions, optionally sorted.
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionsQuery>,
) -> ApiResult<Vec<Question>> {
    let revision_id = state.store.revision_id().await;

    let sort = params
        .sort
        .as_deref()
        .map(QuestionSort::from_param)
        .unwrap_or_default();

    success(state.store.list_questions(sort).await, revision_id)
}

/// GET /api/questions/:id - Get a single question.
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Question> {
    let revision_id = state.store.revision_id().await;

    match state.store.get_question(&id).await {
        Some(question) => success(question, revision_id),
        None => error(
            AppError::NotFound(format!("Question {} not found", id)),
            revision_id,
        ),
    }
}

/// POST /api/questions - Ask a new question.
pub async fn create_question(
    State(state): State<AppState>,
    Json(request): Json<CreateQuestionRequest>,
) -> ApiResult<Question> {
    let revision_id = state.store.revision_id().await;

    // Validate required fields
    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }
    if request.body.trim().is_empty() {
        return error(
            AppError::Validation("Body is required".to_string()),
            revision_id,
        );
    }

    match state
        .store
        .create_question(request.title, request.body, request.tags)
        .await
    {
        Ok(question) => {
            let new_revision = state.store.revision_id().await;
            success(question, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// View count after a view was recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountResponse {
    pub question_id: String,
    pub views: i64,
}

/// POST /api/questions/:id/views - Record a view of a question. Counted at
/// most once per question per session.
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ViewCountResponse> {
    let revision_id = state.store.revision_id().await;

    match state.store.record_view(&id).await {
        Ok(views) => {
            let new_revision = state.store.revision_id().await;
            success(
                ViewCountResponse {
                    question_id: id,
                    views,
                },
                new_revision,
            )
        }
        Err(e) => error(e, revision_id),
    }
}
