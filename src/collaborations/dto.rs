use serde::Deserialize;

use crate::error::FieldError;
use crate::storage::{CollaborationStatus, Id, NewCollaboration};
use crate::validation::{Checker, Validate};

const MAX_MESSAGE_LEN: usize = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub idea_id: Option<Id>,
    pub user_id: Option<Id>,
    pub status: Option<CollaborationStatus>,
    pub message: Option<String>,
}

impl Validate for CollaborationRequest {
    const KIND: &'static str = "collaboration";
    type Output = NewCollaboration;

    fn validate(self) -> Result<NewCollaboration, Vec<FieldError>> {
        let mut c = Checker::default();
        let idea_id = c.id("ideaId", self.idea_id);
        let user_id = c.id("userId", self.user_id);
        let message = c.text("message", self.message);
        c.max_len("message", &message, MAX_MESSAGE_LEN);
        c.finish(NewCollaboration {
            idea_id,
            user_id,
            status: self.status.unwrap_or_default(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_pending() {
        let req: CollaborationRequest =
            serde_json::from_str(r#"{"ideaId":1,"userId":2,"message":"I can design"}"#).unwrap();
        let collab = req.validate().unwrap();
        assert_eq!(collab.status, CollaborationStatus::Pending);
    }

    #[test]
    fn unknown_status_does_not_parse() {
        let res = serde_json::from_str::<CollaborationRequest>(
            r#"{"ideaId":1,"userId":2,"message":"hi","status":"maybe"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn accepted_status_is_kept() {
        let req: CollaborationRequest = serde_json::from_str(
            r#"{"ideaId":1,"userId":2,"message":"hi","status":"accepted"}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap().status, CollaborationStatus::Accepted);
    }
}
