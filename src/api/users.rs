//! User API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::models::{Question, User, UserAnswer};
use crate::AppState;

/// GET /api/users/me - The current user, as supplied by the identity
/// collaborator.
pub async fn get_current_user(State(state): State<AppState>) -> ApiResult<User> {
    let revision_id = state.store.revision_id().await;

    success(state.store.current_user().await, revision_id)
}

/// GET /api/users/:id/questions - Questions asked by a user.
pub async fn user_questions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Question>> {
    let revision_id = state.store.revision_id().await;

    success(state.store.questions_by_author(&id).await, revision_id)
}

/// GET /api/users/:id/answers - Answers posted by a user, each carrying its
/// parent question's id and title.
pub async fn user_answers(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<UserAnswer>> {
    let revision_id = state.store.revision_id().await;

    success(state.store.answers_by_author(&id).await, revision_id)
}
