pub mod auth;
pub mod choices;
pub mod questions;
pub mod votes;

use axum::routing::{get, post};
use axum::Router;
use ballot_core::AppState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Nested resource hierarchy: polls own choices, choices own votes.
/// Verbs without a handler here get a 405 from the method router, which
/// is what makes questions and choices immutable after creation.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route(
            "/api/v1/polls/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/api/v1/polls/{question_id}/",
            get(questions::get_question).delete(questions::delete_question),
        )
        .route(
            "/api/v1/polls/{question_id}/choices/",
            get(choices::list_choices),
        )
        .route(
            "/api/v1/polls/{question_id}/choices/{choice_id}/",
            get(choices::get_choice),
        )
        .route(
            "/api/v1/polls/{question_id}/choices/{choice_id}/votes/",
            get(votes::list_votes).post(votes::create_vote),
        )
        .route(
            "/api/v1/polls/{question_id}/choices/{choice_id}/votes/{vote_id}/",
            get(votes::get_vote)
                .put(votes::update_vote)
                .delete(votes::delete_vote),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
