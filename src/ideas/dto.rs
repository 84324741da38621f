use serde::Deserialize;

use crate::error::FieldError;
use crate::storage::{Id, NewIdea};
use crate::validation::{optional_text, Checker, Validate};

const MAX_TITLE_LEN: usize = 120;

/// Request body for `POST /api/ideas`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<Id>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Validate for CreateIdeaRequest {
    const KIND: &'static str = "idea";
    type Output = NewIdea;

    fn validate(self) -> Result<NewIdea, Vec<FieldError>> {
        let mut c = Checker::default();

        let title = c.text("title", self.title);
        c.max_len("title", &title, MAX_TITLE_LEN);
        let description = c.text("description", self.description);
        let user_id = c.id("userId", self.user_id);

        let tags = match self.tags {
            Some(tags) => {
                let tags: Vec<String> = tags.into_iter().map(|t| t.trim().to_string()).collect();
                if tags.iter().any(String::is_empty) {
                    c.fail("tags", "Tags must not be empty");
                }
                tags
            }
            None => {
                c.fail("tags", "Required");
                Vec::new()
            }
        };

        c.finish(NewIdea {
            title,
            description,
            user_id,
            image: optional_text(self.image),
            tags,
        })
    }
}

/// `?userId=` on idea reads, used for `hasVoted`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerParams {
    pub user_id: Option<Id>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub user_id: Option<Id>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedParams {
    pub limit: Option<usize>,
    pub user_id: Option<Id>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateIdeaRequest {
        CreateIdeaRequest {
            title: Some("Plant swap".into()),
            description: Some("Trade cuttings with neighbours".into()),
            user_id: Some(1),
            image: None,
            tags: Some(vec![" Garden ".into(), "Community".into()]),
        }
    }

    #[test]
    fn valid_idea_trims_tags() {
        let idea = request().validate().unwrap();
        assert_eq!(idea.tags, ["Garden", "Community"]);
        assert_eq!(idea.user_id, 1);
    }

    #[test]
    fn empty_tag_list_is_allowed() {
        let idea = CreateIdeaRequest {
            tags: Some(Vec::new()),
            ..request()
        }
        .validate()
        .unwrap();
        assert!(idea.tags.is_empty());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = CreateIdeaRequest {
            title: None,
            description: None,
            user_id: None,
            image: None,
            tags: None,
        }
        .validate()
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.path[0].as_str()).collect();
        assert_eq!(fields, ["title", "description", "userId", "tags"]);
    }

    #[test]
    fn long_title_and_blank_tag_are_rejected() {
        let errors = CreateIdeaRequest {
            title: Some("x".repeat(MAX_TITLE_LEN + 1)),
            tags: Some(vec!["ok".into(), "  ".into()]),
            ..request()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
