// src/models/submission.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One answered question as sent back by the client.
///
/// The client echoes the `correct` value it received from the fetch; it is
/// trusted as-is and never looked up again.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub user_answer: Option<String>,
    pub correct: Option<String>,
    /// Rendered option list. Kept raw: anything that is not an array is
    /// ignored, and entries are only read when a letter points at them.
    #[serde(default)]
    pub options: Value,
}

impl SubmissionItem {
    pub fn option_list(&self) -> Option<&[Value]> {
        self.options.as_array().map(Vec::as_slice)
    }
}

/// Per-item outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub id: Value,
    pub correct_answer: String,
    pub user_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub total: usize,
    pub score: usize,
    pub details: Vec<ScoreDetail>,
}
