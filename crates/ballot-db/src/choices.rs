use crate::{DbError, DbPool};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChoiceRow {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChoiceWithVotes {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub vote_count: i64,
}

/// Look up a choice scoped to its question. A choice id that exists under a
/// different question resolves to None, which the API surfaces as 404.
pub async fn get_choice(
    pool: &DbPool,
    question_id: i64,
    choice_id: i64,
) -> Result<Option<ChoiceRow>, DbError> {
    let row = sqlx::query_as::<_, ChoiceRow>(
        "SELECT id, question_id, choice_text
         FROM choices
         WHERE id = ?1 AND question_id = ?2",
    )
    .bind(choice_id)
    .bind(question_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Unscoped lookup, used when validating a body-supplied target choice
/// against the question in the path.
pub async fn get_choice_by_id(
    pool: &DbPool,
    choice_id: i64,
) -> Result<Option<ChoiceRow>, DbError> {
    let row = sqlx::query_as::<_, ChoiceRow>(
        "SELECT id, question_id, choice_text
         FROM choices
         WHERE id = ?1",
    )
    .bind(choice_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_with_vote_count(
    pool: &DbPool,
    question_id: i64,
) -> Result<Vec<ChoiceWithVotes>, DbError> {
    let rows = sqlx::query_as::<_, ChoiceWithVotes>(
        "SELECT c.id, c.question_id, c.choice_text, COUNT(v.id) AS vote_count
         FROM choices c
         LEFT JOIN votes v ON v.choice_id = c.id
         WHERE c.question_id = ?1
         GROUP BY c.id
         ORDER BY c.id",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_with_vote_count(
    pool: &DbPool,
    question_id: i64,
    choice_id: i64,
) -> Result<Option<ChoiceWithVotes>, DbError> {
    let row = sqlx::query_as::<_, ChoiceWithVotes>(
        "SELECT c.id, c.question_id, c.choice_text, COUNT(v.id) AS vote_count
         FROM choices c
         LEFT JOIN votes v ON v.choice_id = c.id
         WHERE c.id = ?1 AND c.question_id = ?2
         GROUP BY c.id",
    )
    .bind(choice_id)
    .bind(question_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
