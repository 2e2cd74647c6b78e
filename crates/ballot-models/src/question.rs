use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question as exposed over the API. Choices are write-only on creation
/// and are read back through the nested choices resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub url: String,
    pub author: i64,
    pub question_text: String,
    pub date_published: DateTime<Utc>,
    pub date_created: DateTime<Utc>,
}

impl Question {
    /// Absolute path of the question detail resource.
    pub fn absolute_url(id: i64) -> String {
        format!("/api/v1/polls/{id}/")
    }
}
