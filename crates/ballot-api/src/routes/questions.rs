use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ballot_core::policy::{authorize, Action, Resource};
use ballot_core::validation;
use ballot_core::AppState;
use ballot_models::Question;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{AuthUser, JsonBody};

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub question_text: String,
    pub date_published: DateTime<Utc>,
    #[serde(default)]
    pub choices: Vec<ChoiceInput>,
}

#[derive(Deserialize)]
pub struct ChoiceInput {
    pub choice_text: String,
}

fn to_model(row: ballot_db::questions::QuestionRow) -> Question {
    Question {
        id: row.id,
        url: Question::absolute_url(row.id),
        author: row.author_id,
        question_text: row.question_text,
        date_published: row.date_published,
        date_created: row.date_created,
    }
}

pub async fn list_questions(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Question>>, ApiError> {
    let rows = ballot_db::questions::list_published(&state.db, Utc::now()).await?;
    Ok(Json(rows.into_iter().map(to_model).collect()))
}

pub async fn create_question(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(body): JsonBody<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Question>), ApiError> {
    let choice_texts: Vec<String> = body.choices.into_iter().map(|c| c.choice_text).collect();

    let text_taken = ballot_db::questions::text_exists(&state.db, &body.question_text).await?;
    validation::validate_new_question(&body.question_text, &choice_texts, text_taken)?;

    let (question, _choices) = ballot_db::questions::create_with_choices(
        &state.db,
        auth.user_id,
        &body.question_text,
        body.date_published,
        &choice_texts,
        Utc::now(),
    )
    .await
    .map_err(|e| {
        // A racing create can slip past the pre-check; the unique index
        // reports it as the same validation failure.
        if e.is_unique_violation() {
            ApiError::Validation(validation::FieldError::new(
                "question_text",
                "Question with this text already exists.",
            ))
        } else {
            ApiError::from(e)
        }
    })?;

    tracing::info!("question {} created by user {}", question.id, auth.user_id);

    Ok((StatusCode::CREATED, Json(to_model(question))))
}

pub async fn get_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(question_id): Path<i64>,
) -> Result<Json<Question>, ApiError> {
    let question = ballot_db::questions::get_published(&state.db, question_id, Utc::now())
        .await?
        .ok_or(ApiError::NotFound)?;

    authorize(auth.user_id, Resource::Question(&question), Action::Read)?;

    Ok(Json(to_model(question)))
}

pub async fn delete_question(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(question_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let question = ballot_db::questions::get_published(&state.db, question_id, Utc::now())
        .await?
        .ok_or(ApiError::NotFound)?;

    authorize(auth.user_id, Resource::Question(&question), Action::Delete)?;

    ballot_db::questions::delete_question(&state.db, question.id).await?;
    tracing::info!("question {} deleted by user {}", question.id, auth.user_id);

    Ok(StatusCode::NO_CONTENT)
}
