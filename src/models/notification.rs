//! Notification model.

use serde::{Deserialize, Serialize};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Someone answered the recipient's question.
    Answer,
    /// Someone upvoted the recipient's content.
    Vote,
}

/// A notification emitted as a side effect of a mutation on another user's
/// content. Never deleted, only marked read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub created_at: String,
    pub read: bool,
}
