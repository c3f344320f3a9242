//! User models matching the frontend user shapes.

use serde::{Deserialize, Serialize};

/// A forum user. One full instance represents the current user for the
/// lifetime of the process; it is supplied by the identity collaborator at
/// startup and never destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub reputation: i64,
    pub joined_date: String,
    /// Gates all content-mutating operations.
    pub is_active: bool,
}

impl User {
    /// The reduced author shape embedded in questions and answers,
    /// copied by value at creation time.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            reputation: self.reputation,
        }
    }
}

/// Author reference embedded in content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub reputation: i64,
}
