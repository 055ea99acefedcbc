// src/handlers/scoring.rs

use axum::{Json, body::Bytes, response::IntoResponse};
use serde_json::Value;

use crate::{
    error::AppError,
    models::submission::{ScoreDetail, ScoreResponse, SubmissionItem},
};

/// Positional letters a client may answer with instead of the option text.
const OPTION_LETTERS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

fn is_multiple_choice(question_type: &str) -> bool {
    question_type.to_lowercase().contains("mcq")
}

/// MCQ: the answer matches the correct text (case-insensitive), or is a
/// letter whose option matches the correct text exactly.
fn check_multiple_choice(user_answer: &str, correct: &str, options: Option<&[Value]>) -> bool {
    let user_answer = user_answer.trim();
    let correct = correct.trim();

    if user_answer.is_empty() || correct.is_empty() {
        return false;
    }

    let user_upper = user_answer.to_uppercase();
    if user_upper == correct.to_uppercase() {
        return true;
    }

    let Some(options) = options else {
        return false;
    };

    OPTION_LETTERS
        .iter()
        .position(|letter| *letter == user_upper)
        .and_then(|idx| options.get(idx))
        .and_then(Value::as_str)
        .is_some_and(|option| option.trim() == correct)
}

/// Short answer: any of the comma separated accepted answers, compared
/// case-insensitively after trimming.
fn check_short_answer(user_answer: &str, correct: &str) -> bool {
    let user_answer = user_answer.trim().to_lowercase();
    if user_answer.is_empty() {
        return false;
    }

    correct
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .any(|accepted| accepted == user_answer)
}

fn score_item(item: &SubmissionItem) -> ScoreDetail {
    let user_answer = item.user_answer.clone().unwrap_or_default();
    let correct = item.correct.clone().unwrap_or_default();

    let is_correct = if is_multiple_choice(item.question_type.as_deref().unwrap_or_default()) {
        check_multiple_choice(&user_answer, &correct, item.option_list())
    } else {
        check_short_answer(&user_answer, &correct)
    };

    ScoreDetail {
        id: item.id.clone(),
        correct_answer: correct,
        user_answer,
        is_correct,
    }
}

/// Scores a batch of answers. `score` is the number of correct details.
pub fn score_items(items: &[SubmissionItem]) -> ScoreResponse {
    let details: Vec<ScoreDetail> = items.iter().map(score_item).collect();
    let score = details.iter().filter(|d| d.is_correct).count();

    ScoreResponse {
        total: items.len(),
        score,
        details,
    }
}

/// Scores submitted quiz answers.
///
/// * Body: `{"items": [{id, type, userAnswer, correct, options?}]}`.
/// * 400 when `items` is missing, not an array, or empty.
/// * 500 when the body is not valid JSON or an item field has the wrong type.
pub async fn score_quiz(body: Bytes) -> Result<impl IntoResponse, AppError> {
    let body: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body)?
    };

    // A body that is not an object (including `null`) has no items either.
    let raw_items = match body.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::BadRequest("No items submitted".to_string())),
    };

    let items = raw_items
        .iter()
        .cloned()
        .map(serde_json::from_value::<SubmissionItem>)
        .collect::<Result<Vec<_>, _>>()?;

    let result = score_items(&items);
    tracing::info!("Scored quiz: {}/{}", result.score, result.total);

    Ok(Json(result))
}
