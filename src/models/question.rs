// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::config::{PROP_CORRECT, PROP_LECTURE, PROP_OPTIONS, PROP_QUESTION, PROP_TYPE};
use crate::notion::Page;
use crate::utils::options::parse_options;

/// A quiz record flattened out of its store page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    /// Question type as authored in the store, e.g. "MCQ" or "Short answer".
    #[serde(rename = "type")]
    pub question_type: String,

    pub question: String,

    /// Options in store order. Empty for short-answer questions.
    pub options: Vec<String>,

    /// Correct option text (or letter) for MCQ; comma separated accepted answers otherwise.
    pub correct: String,

    pub lecture_ids: Vec<String>,
}

impl From<&Page> for Question {
    fn from(page: &Page) -> Self {
        let text = |name: &str| {
            page.properties
                .get(name)
                .map(|p| p.as_text())
                .unwrap_or_default()
        };

        Question {
            id: page.id.clone(),
            question_type: text(PROP_TYPE),
            question: text(PROP_QUESTION),
            options: parse_options(&text(PROP_OPTIONS)),
            correct: text(PROP_CORRECT),
            lecture_ids: page
                .properties
                .get(PROP_LECTURE)
                .map(|p| p.relation_ids())
                .unwrap_or_default(),
        }
    }
}

/// Query parameters of the question fetch.
/// Both arrive as raw strings and are interpreted leniently by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionParams {
    pub count: Option<String>,
    pub lectures: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub count: usize,
    pub items: Vec<Question>,
    /// The candidate pool hit the record cap, so the sample was drawn from a prefix.
    pub truncated: bool,
}
