use axum::{
    extract::{Path, State},
    Json,
};
use ballot_core::policy::{authorize, Action, Resource};
use ballot_core::AppState;
use ballot_models::Choice;

use crate::error::ApiError;
use crate::middleware::AuthUser;

fn to_model(row: ballot_db::choices::ChoiceWithVotes) -> Choice {
    Choice {
        id: row.id,
        url: Choice::absolute_url(row.question_id, row.id),
        choice_text: row.choice_text,
        vote_count: row.vote_count,
    }
}

pub async fn list_choices(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(question_id): Path<i64>,
) -> Result<Json<Vec<Choice>>, ApiError> {
    authorize(auth.user_id, Resource::Choice, Action::Read)?;

    ballot_db::questions::get_question(&state.db, question_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let rows = ballot_db::choices::list_with_vote_count(&state.db, question_id).await?;
    Ok(Json(rows.into_iter().map(to_model).collect()))
}

pub async fn get_choice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((question_id, choice_id)): Path<(i64, i64)>,
) -> Result<Json<Choice>, ApiError> {
    authorize(auth.user_id, Resource::Choice, Action::Read)?;

    // Scoped lookup: a choice belonging to a different question is a 404,
    // the nesting in the path is part of the identity.
    let choice = ballot_db::choices::get_with_vote_count(&state.db, question_id, choice_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(to_model(choice)))
}
