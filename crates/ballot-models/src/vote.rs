use serde::{Deserialize, Serialize};

/// Placeholder shown instead of the voter's username when the vote hides it.
pub const HIDDEN_VOTER: &str = "*******";

/// A vote as exposed over the API. The target choice and the hide_voter
/// flag are write-only; reads expose only the (possibly masked) voter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: i64,
    pub voter_username: String,
}

impl Vote {
    /// Build the read representation, masking the voter when requested.
    pub fn new(id: i64, voter_username: &str, hide_voter: bool) -> Self {
        let voter_username = if hide_voter {
            HIDDEN_VOTER.to_string()
        } else {
            voter_username.to_string()
        };
        Vote { id, voter_username }
    }
}

#[cfg(test)]
mod tests {
    use super::{Vote, HIDDEN_VOTER};

    #[test]
    fn hidden_vote_masks_username() {
        let vote = Vote::new(1, "alice", true);
        assert_eq!(vote.voter_username, HIDDEN_VOTER);
    }

    #[test]
    fn visible_vote_exposes_username() {
        let vote = Vote::new(1, "alice", false);
        assert_eq!(vote.voter_username, "alice");
    }
}
