use serde::Deserialize;

use crate::error::FieldError;
use crate::storage::{Id, NewComment};
use crate::validation::{Checker, Validate};

const MAX_CONTENT_LEN: usize = 2000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub idea_id: Option<Id>,
    pub user_id: Option<Id>,
    pub content: Option<String>,
}

impl Validate for CommentRequest {
    const KIND: &'static str = "comment";
    type Output = NewComment;

    fn validate(self) -> Result<NewComment, Vec<FieldError>> {
        let mut c = Checker::default();
        let idea_id = c.id("ideaId", self.idea_id);
        let user_id = c.id("userId", self.user_id);
        let content = c.text("content", self.content);
        c.max_len("content", &content, MAX_CONTENT_LEN);
        c.finish(NewComment {
            idea_id,
            user_id,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_trimmed() {
        let comment = CommentRequest {
            idea_id: Some(1),
            user_id: Some(2),
            content: Some("  nice  ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(comment.content, "nice");
    }

    #[test]
    fn blank_content_is_rejected() {
        let errors = CommentRequest {
            idea_id: Some(1),
            user_id: Some(2),
            content: Some(" ".into()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].path, ["content"]);
    }
}
