use async_trait::async_trait;

mod memory;
mod seed;
pub mod types;

pub use memory::MemStorage;
pub use types::*;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
}

/// Repository for everything the API serves.
///
/// `viewer` on idea reads is the user whose `hasVoted` flag should be
/// filled in; `None` leaves the flag out.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: Id) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn list_users(&self) -> Vec<User>;
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    async fn list_ideas(&self, viewer: Option<Id>) -> Vec<IdeaWithVotes>;
    async fn get_idea(&self, id: Id, viewer: Option<Id>) -> Option<IdeaWithVotes>;
    async fn create_idea(&self, idea: NewIdea) -> Result<Idea, StorageError>;
    async fn featured_ideas(&self, limit: usize, viewer: Option<Id>) -> Vec<IdeaWithVotes>;
    async fn user_ideas(&self, user_id: Id) -> Vec<IdeaWithVotes>;
    async fn search_ideas(
        &self,
        query: &str,
        tags: &[String],
        viewer: Option<Id>,
    ) -> Vec<IdeaWithVotes>;

    /// Removes the viewer's vote if there is one, otherwise adds it.
    async fn toggle_vote(&self, vote: NewVote) -> Result<VoteToggle, StorageError>;

    async fn comments_for_idea(&self, idea_id: Id) -> Vec<CommentWithAuthor>;
    async fn add_comment(&self, comment: NewComment) -> Result<CommentWithAuthor, StorageError>;

    async fn collaborations_for_idea(
        &self,
        idea_id: Id,
    ) -> Result<Vec<Collaboration>, StorageError>;
    async fn collaborations_for_user(&self, user_id: Id) -> Vec<Collaboration>;
    async fn add_collaboration(
        &self,
        collaboration: NewCollaboration,
    ) -> Result<Collaboration, StorageError>;

    async fn counts(&self) -> Counts;
}
