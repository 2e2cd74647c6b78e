use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ballot_core::policy::{authorize, Action, Resource};
use ballot_core::validation::{self, FieldError};
use ballot_core::AppState;
use ballot_db::choices::ChoiceRow;
use ballot_models::Vote;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{AuthUser, JsonBody};

#[derive(Deserialize)]
pub struct VoteRequest {
    /// Target choice id. Defaults to the choice in the path on create;
    /// omitting it on update keeps the current choice.
    pub choice: Option<i64>,
    /// Defaults to hidden on create; omitting it on update keeps the
    /// stored value.
    pub hide_voter: Option<bool>,
}

/// Resolve the question/choice pair named in the path. Both must exist and
/// the choice must be nested under the question, else the path is a 404.
async fn resolve_path_choice(
    state: &AppState,
    question_id: i64,
    choice_id: i64,
) -> Result<ChoiceRow, ApiError> {
    ballot_db::questions::get_question(&state.db, question_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    ballot_db::choices::get_choice(&state.db, question_id, choice_id)
        .await?
        .ok_or(ApiError::NotFound)
}

/// Resolve the body-level target choice. Unlike path segments, a bad id
/// here is invalid input: 400, never 404.
async fn resolve_target_choice(
    state: &AppState,
    question_id: i64,
    target_id: i64,
) -> Result<ChoiceRow, ApiError> {
    let choice = ballot_db::choices::get_choice_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(FieldError::new(
                "choice",
                format!("Invalid choice \"{target_id}\" - object does not exist."),
            ))
        })?;
    validation::validate_vote_target(choice.question_id, question_id)?;
    Ok(choice)
}

pub async fn list_votes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((question_id, choice_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, ApiError> {
    let choice = resolve_path_choice(&state, question_id, choice_id).await?;

    let rows = ballot_db::votes::list_choice_votes(&state.db, choice.id).await?;
    let results: Vec<Vote> = rows
        .iter()
        .map(|v| Vote::new(v.id, &v.voter_username, v.hide_voter))
        .collect();

    Ok(Json(json!({
        "count": results.len(),
        "results": results,
    })))
}

pub async fn create_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((question_id, choice_id)): Path<(i64, i64)>,
    JsonBody(body): JsonBody<VoteRequest>,
) -> Result<(StatusCode, Json<Vote>), ApiError> {
    // Votes can only be cast on published questions.
    ballot_db::questions::get_published(&state.db, question_id, Utc::now())
        .await?
        .ok_or(ApiError::NotFound)?;
    let path_choice = ballot_db::choices::get_choice(&state.db, question_id, choice_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let target = match body.choice {
        Some(id) if id != path_choice.id => resolve_target_choice(&state, question_id, id).await?,
        _ => path_choice,
    };

    let prior = ballot_db::votes::count_for_question_by_voter(&state.db, question_id, auth.user_id)
        .await?;
    validation::validate_first_vote(prior)?;

    let hide_voter = body.hide_voter.unwrap_or(true);
    let vote = ballot_db::votes::create_vote(&state.db, target.id, auth.user_id, hide_voter)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::Validation(FieldError::new("choice", "Multiple voting detected."))
            } else {
                ApiError::from(e)
            }
        })?;

    tracing::debug!(
        "vote {} cast by user {} on choice {}",
        vote.id,
        auth.user_id,
        target.id
    );

    Ok((
        StatusCode::CREATED,
        Json(Vote::new(vote.id, &auth.username, vote.hide_voter)),
    ))
}

pub async fn get_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((question_id, choice_id, vote_id)): Path<(i64, i64, i64)>,
) -> Result<Json<Vote>, ApiError> {
    let choice = resolve_path_choice(&state, question_id, choice_id).await?;
    let vote = ballot_db::votes::get_vote(&state.db, choice.id, vote_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let row = vote.as_row();
    authorize(auth.user_id, Resource::Vote(&row), Action::Read)?;

    Ok(Json(Vote::new(vote.id, &vote.voter_username, vote.hide_voter)))
}

pub async fn update_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((question_id, choice_id, vote_id)): Path<(i64, i64, i64)>,
    JsonBody(body): JsonBody<VoteRequest>,
) -> Result<Json<Vote>, ApiError> {
    let choice = resolve_path_choice(&state, question_id, choice_id).await?;
    let vote = ballot_db::votes::get_vote(&state.db, choice.id, vote_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let row = vote.as_row();
    authorize(auth.user_id, Resource::Vote(&row), Action::Update)?;

    // Validation precedes the write: a rejected target leaves the stored
    // vote untouched.
    let target_id = match body.choice {
        Some(id) => resolve_target_choice(&state, question_id, id).await?.id,
        None => vote.choice_id,
    };
    let hide_voter = body.hide_voter.unwrap_or(vote.hide_voter);

    ballot_db::votes::update_vote(&state.db, vote.id, target_id, hide_voter).await?;

    Ok(Json(Vote::new(vote.id, &vote.voter_username, hide_voter)))
}

pub async fn delete_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((question_id, choice_id, vote_id)): Path<(i64, i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let choice = resolve_path_choice(&state, question_id, choice_id).await?;
    let vote = ballot_db::votes::get_vote(&state.db, choice.id, vote_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let row = vote.as_row();
    authorize(auth.user_id, Resource::Vote(&row), Action::Delete)?;

    ballot_db::votes::delete_vote(&state.db, vote.id).await?;
    tracing::debug!("vote {} deleted by user {}", vote.id, auth.user_id);

    Ok(StatusCode::NO_CONTENT)
}
