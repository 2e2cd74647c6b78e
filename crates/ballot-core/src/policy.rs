use crate::error::CoreError;
use ballot_db::questions::QuestionRow;
use ballot_db::votes::VoteRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// Object-level authorization, evaluated after the authentication gate.
/// One explicit function instead of per-view permission classes: given an
/// authenticated identity, a resource and an action, allow or deny.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Question(&'a QuestionRow),
    /// Choices have no owner and no mutating routes.
    Choice,
    Vote(&'a VoteRow),
}

pub fn authorize(identity: i64, resource: Resource<'_>, action: Action) -> Result<(), CoreError> {
    let allowed = match (resource, action) {
        // Questions: anyone reads and creates, only the author deletes,
        // updates have no route at all.
        (Resource::Question(_), Action::Read | Action::Create) => true,
        (Resource::Question(q), Action::Delete) => q.author_id == identity,
        (Resource::Question(_), Action::Update) => false,

        // Choices are read-only.
        (Resource::Choice, Action::Read) => true,
        (Resource::Choice, _) => false,

        // Votes: any authenticated identity reads (hide_voter controls
        // name visibility, not access); only the voter mutates.
        (Resource::Vote(_), Action::Read) => true,
        (Resource::Vote(v), Action::Create | Action::Update | Action::Delete) => {
            v.voter_id == identity
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn question(author_id: i64) -> QuestionRow {
        QuestionRow {
            id: 1,
            author_id,
            question_text: "Q".to_string(),
            date_published: Utc::now(),
            date_created: Utc::now(),
        }
    }

    fn vote(voter_id: i64) -> VoteRow {
        VoteRow {
            id: 1,
            choice_id: 1,
            voter_id,
            hide_voter: true,
        }
    }

    #[test]
    fn only_the_author_deletes_a_question() {
        let q = question(1);
        assert!(authorize(1, Resource::Question(&q), Action::Delete).is_ok());
        assert!(matches!(
            authorize(2, Resource::Question(&q), Action::Delete),
            Err(CoreError::Forbidden)
        ));
        assert!(authorize(2, Resource::Question(&q), Action::Read).is_ok());
    }

    #[test]
    fn questions_are_never_updatable() {
        let q = question(1);
        assert!(authorize(1, Resource::Question(&q), Action::Update).is_err());
    }

    #[test]
    fn choices_are_read_only() {
        assert!(authorize(1, Resource::Choice, Action::Read).is_ok());
        assert!(authorize(1, Resource::Choice, Action::Create).is_err());
        assert!(authorize(1, Resource::Choice, Action::Delete).is_err());
    }

    #[test]
    fn votes_are_mutable_by_their_voter_only() {
        let v = vote(1);
        assert!(authorize(1, Resource::Vote(&v), Action::Update).is_ok());
        assert!(authorize(1, Resource::Vote(&v), Action::Delete).is_ok());
        assert!(authorize(2, Resource::Vote(&v), Action::Update).is_err());
        // Reads are open; the hide_voter flag does the masking.
        assert!(authorize(2, Resource::Vote(&v), Action::Read).is_ok());
    }
}
