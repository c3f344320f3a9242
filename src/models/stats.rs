//! Derived aggregates: tag counts and platform statistics.

use serde::{Deserialize, Serialize};

/// A tag with its live question count. Recomputed on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}

/// Platform-wide summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_questions: i64,
    pub total_answers: i64,
    /// Distinct users across question and answer authors, counted by id.
    pub total_users: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_used_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_voted_question: Option<StatsQuestion>,
}

/// Reference to the highest-voted question in the stats summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuestion {
    pub id: String,
    pub title: String,
    pub votes: i64,
}
