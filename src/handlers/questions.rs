// src/handlers/questions.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    config::{CANDIDATE_CAP, Config, DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, PROP_LECTURE},
    error::AppError,
    models::question::{Question, QuestionParams, QuestionsResponse},
    notion::{NotionClient, QueryFilter},
    utils::sample::shuffle_and_take,
};

/// Reads `count` the way the quiz client sends it: a leading integer,
/// anything else falls back to the default. Clamped to `1..=MAX_QUESTION_COUNT`.
fn parse_count(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_QUESTION_COUNT;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return DEFAULT_QUESTION_COUNT;
    }
    if negative {
        return 1;
    }

    digits
        .parse::<usize>()
        .map(|n| n.clamp(1, MAX_QUESTION_COUNT))
        .unwrap_or(MAX_QUESTION_COUNT)
}

/// Splits the comma separated lecture ids, dropping blanks and repeats.
fn parse_lectures(raw: Option<&str>) -> Vec<String> {
    let mut lectures: Vec<String> = Vec::new();
    for id in raw.unwrap_or_default().split(',').map(str::trim) {
        if !id.is_empty() && !lectures.iter().any(|l| l == id) {
            lectures.push(id.to_string());
        }
    }
    lectures
}

/// Returns a random sample of quiz questions.
///
/// * `lectures`: optional comma separated lecture page ids; a question matches
///   when it is linked to any of them.
/// * `count`: sample size, default 20, clamped to 1..=50.
///
/// Candidates are collected page by page (capped at 500 records), shuffled,
/// and truncated to `count`.
pub async fn get_questions(
    State(store): State<Arc<NotionClient>>,
    State(config): State<Config>,
    Query(params): Query<QuestionParams>,
) -> Result<impl IntoResponse, AppError> {
    let count = parse_count(params.count.as_deref());
    let lectures = parse_lectures(params.lectures.as_deref());
    let filter = QueryFilter::any_relation(PROP_LECTURE, &lectures);

    let outcome = store
        .query_all(&config.quiz_database_id, filter, CANDIDATE_CAP)
        .await
        .map_err(|e| {
            tracing::error!("Failed to query quiz database: {:?}", e);
            AppError::from(e)
        })?;

    if outcome.truncated {
        tracing::warn!(
            "Quiz candidate pool capped at {} records; sampling from the first pages only",
            outcome.pages.len()
        );
    }

    let candidates: Vec<Question> = outcome.pages.iter().map(Question::from).collect();
    let items = shuffle_and_take(candidates, count, &mut rand::thread_rng());

    tracing::info!(
        "Serving {} questions (requested {}, lectures: {})",
        items.len(),
        count,
        lectures.len()
    );

    Ok(Json(QuestionsResponse {
        count: items.len(),
        items,
        truncated: outcome.truncated,
    }))
}
