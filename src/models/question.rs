//! Question and answer models matching the frontend interfaces.

use serde::{Deserialize, Serialize};

use super::UserSummary;

/// A question with its embedded answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Order-preserving; the store does not deduplicate.
    #[serde(default)]
    pub tags: Vec<String>,
    pub votes: i64,
    pub views: i64,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub author: UserSummary,
    pub created_at: String,
    pub has_accepted_answer: bool,
}

impl Question {
    /// Timestamp of the most recent activity on this question: its own
    /// creation or the latest answer, whichever is later. RFC 3339 strings
    /// compare correctly lexicographically.
    pub fn last_activity_at(&self) -> &str {
        self.answers
            .iter()
            .map(|a| a.created_at.as_str())
            .chain(std::iter::once(self.created_at.as_str()))
            .max()
            .unwrap_or(self.created_at.as_str())
    }
}

/// An answer, owned exclusively by its parent question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub body: String,
    pub votes: i64,
    pub author: UserSummary,
    pub created_at: String,
    pub is_accepted: bool,
}

/// An answer projected with its parent question's identity, as returned by
/// the per-user answer listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    #[serde(flatten)]
    pub answer: Answer,
    pub question_id: String,
    pub question_title: String,
}

/// Request body for asking a new question.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for posting an answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    pub body: String,
}

/// Request body for voting on a question or answer. By convention the
/// delta is +1 or -1; the store applies it without range-checking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub delta: i64,
}

/// Sort orders for the question listing, as offered by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionSort {
    #[default]
    Newest,
    Active,
    Votes,
    Unanswered,
}

impl QuestionSort {
    /// Parse a `?sort=` query value. Unknown values fall back to `Newest`.
    pub fn from_param(s: &str) -> Self {
        match s {
            "active" => QuestionSort::Active,
            "votes" => QuestionSort::Votes,
            "unanswered" => QuestionSort::Unanswered,
            _ => QuestionSort::Newest,
        }
    }
}
