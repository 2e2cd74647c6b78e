use crate::choices::ChoiceRow;
use crate::{DbError, DbPool};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub author_id: i64,
    pub question_text: String,
    pub date_published: DateTime<Utc>,
    pub date_created: DateTime<Utc>,
}

/// Insert a question together with all of its choices in one transaction.
/// If any choice insert fails (duplicate text, for instance) the question
/// row does not survive either.
pub async fn create_with_choices(
    pool: &DbPool,
    author_id: i64,
    question_text: &str,
    date_published: DateTime<Utc>,
    choice_texts: &[String],
    now: DateTime<Utc>,
) -> Result<(QuestionRow, Vec<ChoiceRow>), DbError> {
    let mut tx = pool.begin().await?;

    let question = sqlx::query_as::<_, QuestionRow>(
        "INSERT INTO questions (author_id, question_text, date_published, date_created)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, author_id, question_text, date_published, date_created",
    )
    .bind(author_id)
    .bind(question_text)
    .bind(date_published)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let mut choices = Vec::with_capacity(choice_texts.len());
    for text in choice_texts {
        let choice = sqlx::query_as::<_, ChoiceRow>(
            "INSERT INTO choices (question_id, choice_text)
             VALUES (?1, ?2)
             RETURNING id, question_id, choice_text",
        )
        .bind(question.id)
        .bind(text)
        .fetch_one(&mut *tx)
        .await?;
        choices.push(choice);
    }

    tx.commit().await?;
    Ok((question, choices))
}

/// Published questions: date_published has passed and at least one choice
/// exists. Most recently published first.
pub async fn list_published(
    pool: &DbPool,
    now: DateTime<Utc>,
) -> Result<Vec<QuestionRow>, DbError> {
    let rows = sqlx::query_as::<_, QuestionRow>(
        "SELECT q.id, q.author_id, q.question_text, q.date_published, q.date_created
         FROM questions q
         WHERE q.date_published <= ?1
           AND EXISTS (SELECT 1 FROM choices c WHERE c.question_id = q.id)
         ORDER BY q.date_published DESC",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Look up a question within the published set only. Unpublished questions
/// are invisible through every read path, so this returns None for them.
pub async fn get_published(
    pool: &DbPool,
    question_id: i64,
    now: DateTime<Utc>,
) -> Result<Option<QuestionRow>, DbError> {
    let row = sqlx::query_as::<_, QuestionRow>(
        "SELECT q.id, q.author_id, q.question_text, q.date_published, q.date_created
         FROM questions q
         WHERE q.id = ?1
           AND q.date_published <= ?2
           AND EXISTS (SELECT 1 FROM choices c WHERE c.question_id = q.id)",
    )
    .bind(question_id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn get_question(
    pool: &DbPool,
    question_id: i64,
) -> Result<Option<QuestionRow>, DbError> {
    let row = sqlx::query_as::<_, QuestionRow>(
        "SELECT id, author_id, question_text, date_published, date_created
         FROM questions
         WHERE id = ?1",
    )
    .bind(question_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn text_exists(pool: &DbPool, question_text: &str) -> Result<bool, DbError> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT 1 FROM questions WHERE question_text = ?1 LIMIT 1",
    )
    .bind(question_text)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Delete a question. Choices and their votes go with it via cascade.
pub async fn delete_question(pool: &DbPool, question_id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(question_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
