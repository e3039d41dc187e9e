pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::auth::api_key_middleware;
use crate::generation::handlers;
use crate::rate_limit::rate_limit_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Layers run bottom-up: the key check comes before the rate limiter.
    let protected = Router::new()
        .route(
            "/generate_cover_letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route(
            "/generate_cover_letter_with_cv",
            post(handlers::handle_generate_cover_letter_with_cv),
        )
        .route(
            "/evaluate_cv_match",
            post(handlers::handle_evaluate_cv_match),
        )
        .route(
            "/generate_interview_questions",
            post(handlers::handle_generate_interview_questions),
        )
        .route_layer(from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .route_layer(from_fn_with_state(state.api_key.clone(), api_key_middleware));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
