//! Datastore snapshot model.

use serde::{Deserialize, Serialize};

use super::{Notification, Question, User};

/// Read-only snapshot of the full application state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datastore {
    pub schema_version: i32,
    pub generated_at: String,
    pub revision_id: i64,
    pub current_user: User,
    pub questions: Vec<Question>,
    pub notifications: Vec<Notification>,
    pub saved_question_ids: Vec<String>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
