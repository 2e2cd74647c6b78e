use crate::{DbError, DbPool};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VoteRow {
    pub id: i64,
    pub choice_id: i64,
    pub voter_id: i64,
    pub hide_voter: bool,
}

/// Vote joined with the voter's username for read serialization.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VoteWithVoter {
    pub id: i64,
    pub choice_id: i64,
    pub voter_id: i64,
    pub hide_voter: bool,
    pub voter_username: String,
}

impl VoteWithVoter {
    /// The bare row, for object-level authorization checks.
    pub fn as_row(&self) -> VoteRow {
        VoteRow {
            id: self.id,
            choice_id: self.choice_id,
            voter_id: self.voter_id,
            hide_voter: self.hide_voter,
        }
    }
}

pub async fn create_vote(
    pool: &DbPool,
    choice_id: i64,
    voter_id: i64,
    hide_voter: bool,
) -> Result<VoteRow, DbError> {
    let row = sqlx::query_as::<_, VoteRow>(
        "INSERT INTO votes (choice_id, voter_id, hide_voter)
         VALUES (?1, ?2, ?3)
         RETURNING id, choice_id, voter_id, hide_voter",
    )
    .bind(choice_id)
    .bind(voter_id)
    .bind(hide_voter)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn list_choice_votes(
    pool: &DbPool,
    choice_id: i64,
) -> Result<Vec<VoteWithVoter>, DbError> {
    let rows = sqlx::query_as::<_, VoteWithVoter>(
        "SELECT v.id, v.choice_id, v.voter_id, v.hide_voter, u.username AS voter_username
         FROM votes v
         JOIN users u ON u.id = v.voter_id
         WHERE v.choice_id = ?1
         ORDER BY v.id",
    )
    .bind(choice_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Look up a vote scoped to its choice, mirroring the nested route shape.
pub async fn get_vote(
    pool: &DbPool,
    choice_id: i64,
    vote_id: i64,
) -> Result<Option<VoteWithVoter>, DbError> {
    let row = sqlx::query_as::<_, VoteWithVoter>(
        "SELECT v.id, v.choice_id, v.voter_id, v.hide_voter, u.username AS voter_username
         FROM votes v
         JOIN users u ON u.id = v.voter_id
         WHERE v.id = ?1 AND v.choice_id = ?2",
    )
    .bind(vote_id)
    .bind(choice_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn update_vote(
    pool: &DbPool,
    vote_id: i64,
    choice_id: i64,
    hide_voter: bool,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "UPDATE votes
         SET choice_id = ?2, hide_voter = ?3
         WHERE id = ?1",
    )
    .bind(vote_id)
    .bind(choice_id)
    .bind(hide_voter)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_vote(pool: &DbPool, vote_id: i64) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM votes WHERE id = ?1")
        .bind(vote_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// How many votes this voter already holds across all choices of a
/// question. The one-vote-per-question rule checks this on creation.
pub async fn count_for_question_by_voter(
    pool: &DbPool,
    question_id: i64,
    voter_id: i64,
) -> Result<i64, DbError> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM votes v
         JOIN choices c ON c.id = v.choice_id
         WHERE c.question_id = ?1 AND v.voter_id = ?2",
    )
    .bind(question_id)
    .bind(voter_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
