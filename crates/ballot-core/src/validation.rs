use std::collections::HashSet;
use thiserror::Error;

pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 20;
pub const MAX_TEXT_LEN: usize = 200;

/// A business-rule rejection tied to a payload field. Surfaced to clients
/// as a 400 with the field name attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// Validate a proposed question against the creation rules. `text_taken`
/// is the caller's answer to "does this question_text already exist" so
/// the check stays a pure function of its inputs.
pub fn validate_new_question(
    question_text: &str,
    choice_texts: &[String],
    text_taken: bool,
) -> Result<(), FieldError> {
    if question_text.is_empty() {
        return Err(FieldError::new("question_text", "May not be blank."));
    }
    if question_text.chars().count() > MAX_TEXT_LEN {
        return Err(FieldError::new(
            "question_text",
            format!("Ensure this field has no more than {MAX_TEXT_LEN} characters."),
        ));
    }
    if text_taken {
        return Err(FieldError::new(
            "question_text",
            "Question with this text already exists.",
        ));
    }

    if choice_texts.len() < MIN_CHOICES {
        return Err(FieldError::new("choices", "Should be at least two."));
    }
    if choice_texts.len() > MAX_CHOICES {
        return Err(FieldError::new("choices", "Should not be more than 20."));
    }

    let mut seen = HashSet::new();
    for text in choice_texts {
        if text.is_empty() {
            return Err(FieldError::new("choices", "May not be blank."));
        }
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(FieldError::new(
                "choices",
                format!("Ensure choices have no more than {MAX_TEXT_LEN} characters."),
            ));
        }
        if !seen.insert(text.as_str()) {
            return Err(FieldError::new("choices", "Should be unique."));
        }
    }

    Ok(())
}

/// The target choice of a vote must belong to the question named in the
/// request path. A mismatch is invalid input, not a failed lookup.
pub fn validate_vote_target(
    choice_question_id: i64,
    question_id: i64,
) -> Result<(), FieldError> {
    if choice_question_id != question_id {
        return Err(FieldError::new(
            "choice",
            "Is not accepted by this question.",
        ));
    }
    Ok(())
}

/// Creation-time only: a voter holds at most one vote across all choices
/// of a question. Updates deliberately skip this (the storage constraint
/// still blocks duplicates on the same choice).
pub fn validate_first_vote(prior_votes_on_question: i64) -> Result<(), FieldError> {
    if prior_votes_on_question > 0 {
        return Err(FieldError::new("choice", "Multiple voting detected."));
    }
    Ok(())
}
