// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    handlers::{questions, scoring},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Quiz routes live under `/api/quiz`.
/// * The same handlers are also mounted at the paths of the old serverless
///   functions so existing clients keep working.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/questions", get(questions::get_questions))
        .route("/score", post(scoring::score_quiz));

    let legacy_routes = Router::new()
        .route("/get-questions", get(questions::get_questions))
        .route("/score-quiz", post(scoring::score_quiz));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/.netlify/functions", legacy_routes)
        .fallback(not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `*` allows any origin; otherwise only the listed origins.
fn allowed_origins(configured: &[String]) -> AllowOrigin {
    if configured.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
