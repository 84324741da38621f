use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::storage::{Id, NewVote};
use crate::validation::{Checker, Validate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub idea_id: Option<Id>,
    pub user_id: Option<Id>,
}

impl Validate for VoteRequest {
    const KIND: &'static str = "vote";
    type Output = NewVote;

    fn validate(self) -> Result<NewVote, Vec<FieldError>> {
        let mut c = Checker::default();
        let idea_id = c.id("ideaId", self.idea_id);
        let user_id = c.id("userId", self.user_id);
        c.finish(NewVote { idea_id, user_id })
    }
}

/// Body returned when a repeated vote takes the earlier one back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRemoved {
    pub message: &'static str,
    pub idea_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_ids_are_required() {
        let errors = VoteRequest {
            idea_id: None,
            user_id: Some(0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn removed_body_uses_camel_case() {
        let json = serde_json::to_value(VoteRemoved {
            message: "Vote removed",
            idea_id: 4,
        })
        .unwrap();
        assert_eq!(json["ideaId"], 4);
        assert_eq!(json["message"], "Vote removed");
    }
}
