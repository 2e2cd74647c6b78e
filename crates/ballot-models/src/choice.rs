use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub url: String,
    pub choice_text: String,
    pub vote_count: i64,
}

impl Choice {
    /// Absolute path of the choice detail resource, nested under its question.
    pub fn absolute_url(question_id: i64, id: i64) -> String {
        format!("/api/v1/polls/{question_id}/choices/{id}/")
    }
}
