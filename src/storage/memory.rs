use std::collections::BTreeMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use super::{seed, types::*, Storage, StorageError};

/// In-memory store. Ids are handed out per table starting at 1 and maps
/// iterate in id order, which doubles as insertion order.
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Store preloaded with the demo users, ideas, votes and comments.
    pub fn seeded() -> anyhow::Result<Self> {
        let mut tables = Tables::default();
        seed::load(&mut tables)?;
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

struct NextIds {
    users: Id,
    ideas: Id,
    votes: Id,
    comments: Id,
    collaborations: Id,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            users: 1,
            ideas: 1,
            votes: 1,
            comments: 1,
            collaborations: 1,
        }
    }
}

fn bump(counter: &mut Id) -> Id {
    let id = *counter;
    *counter += 1;
    id
}

#[derive(Default)]
pub(super) struct Tables {
    users: BTreeMap<Id, User>,
    ideas: BTreeMap<Id, Idea>,
    votes: BTreeMap<Id, Vote>,
    comments: BTreeMap<Id, Comment>,
    collaborations: BTreeMap<Id, Collaboration>,
    next: NextIds,
}

impl Tables {
    fn author(&self, user_id: Id) -> Author {
        self.users
            .get(&user_id)
            .map(Author::from)
            .unwrap_or_else(Author::unknown)
    }

    fn vote_count(&self, idea_id: Id) -> usize {
        self.votes.values().filter(|v| v.idea_id == idea_id).count()
    }

    fn has_voted(&self, user_id: Id, idea_id: Id) -> bool {
        self.votes
            .values()
            .any(|v| v.user_id == user_id && v.idea_id == idea_id)
    }

    fn with_votes(&self, idea: &Idea, viewer: Option<Id>) -> IdeaWithVotes {
        IdeaWithVotes {
            idea: idea.clone(),
            votes: self.vote_count(idea.id),
            author: self.author(idea.user_id),
            has_voted: viewer.map(|user_id| self.has_voted(user_id, idea.id)),
        }
    }

    /// Every idea, most voted first. The sort is stable so ties keep id order.
    fn ranked_ideas(&self, viewer: Option<Id>) -> Vec<IdeaWithVotes> {
        let mut ideas: Vec<_> = self
            .ideas
            .values()
            .map(|idea| self.with_votes(idea, viewer))
            .collect();
        ideas.sort_by(|a, b| b.votes.cmp(&a.votes));
        ideas
    }

    fn comments_for(&self, idea_id: Id) -> Vec<CommentWithAuthor> {
        let mut comments: Vec<_> = self
            .comments
            .values()
            .filter(|c| c.idea_id == idea_id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                author: self.author(c.user_id),
            })
            .collect();
        comments.sort_by(|a, b| {
            b.comment
                .created_at
                .cmp(&a.comment.created_at)
                .then(b.comment.id.cmp(&a.comment.id))
        });
        comments
    }

    fn collaborations_where(&self, keep: impl Fn(&Collaboration) -> bool) -> Vec<Collaboration> {
        let mut found: Vec<_> = self
            .collaborations
            .values()
            .filter(|&c| keep(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        found
    }

    /// Idea first, then user: the order callers report missing references in.
    fn ensure_refs(&self, idea_id: Id, user_id: Id) -> Result<(), StorageError> {
        if !self.ideas.contains_key(&idea_id) {
            return Err(StorageError::NotFound("Idea"));
        }
        if !self.users.contains_key(&user_id) {
            return Err(StorageError::NotFound("User"));
        }
        Ok(())
    }

    pub(super) fn insert_user(&mut self, new: NewUser) -> Result<User, StorageError> {
        if self.users.values().any(|u| u.username == new.username) {
            return Err(StorageError::Conflict("Username already exists".into()));
        }
        let email = new.email.trim().to_lowercase();
        if self.users.values().any(|u| u.email == email) {
            return Err(StorageError::Conflict("Email already exists".into()));
        }

        let id = bump(&mut self.next.users);
        let user = User {
            id,
            username: new.username,
            password_hash: new.password_hash,
            name: new.name,
            email,
            avatar: new.avatar,
            bio: new.bio,
            skills: new.skills,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub(super) fn insert_idea(&mut self, new: NewIdea) -> Result<Idea, StorageError> {
        if !self.users.contains_key(&new.user_id) {
            return Err(StorageError::NotFound("User"));
        }
        let id = bump(&mut self.next.ideas);
        let idea = Idea {
            id,
            title: new.title,
            description: new.description,
            user_id: new.user_id,
            image: new.image,
            tags: new.tags,
            created_at: OffsetDateTime::now_utc(),
            is_trending: false,
            is_new: true,
        };
        self.ideas.insert(id, idea.clone());
        Ok(idea)
    }

    pub(super) fn insert_vote(&mut self, new: NewVote) -> Result<Vote, StorageError> {
        self.ensure_refs(new.idea_id, new.user_id)?;
        if self.has_voted(new.user_id, new.idea_id) {
            return Err(StorageError::Conflict(
                "User has already voted for this idea".into(),
            ));
        }
        let id = bump(&mut self.next.votes);
        let vote = Vote {
            id,
            idea_id: new.idea_id,
            user_id: new.user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        self.votes.insert(id, vote.clone());
        Ok(vote)
    }

    fn delete_vote(&mut self, user_id: Id, idea_id: Id) -> bool {
        let found = self
            .votes
            .values()
            .find(|v| v.user_id == user_id && v.idea_id == idea_id)
            .map(|v| v.id);
        match found {
            Some(id) => self.votes.remove(&id).is_some(),
            None => false,
        }
    }

    pub(super) fn insert_comment(&mut self, new: NewComment) -> Result<Comment, StorageError> {
        self.ensure_refs(new.idea_id, new.user_id)?;
        let id = bump(&mut self.next.comments);
        let comment = Comment {
            id,
            idea_id: new.idea_id,
            user_id: new.user_id,
            content: new.content,
            created_at: OffsetDateTime::now_utc(),
        };
        self.comments.insert(id, comment.clone());
        Ok(comment)
    }

    pub(super) fn insert_collaboration(
        &mut self,
        new: NewCollaboration,
    ) -> Result<Collaboration, StorageError> {
        self.ensure_refs(new.idea_id, new.user_id)?;
        let id = bump(&mut self.next.collaborations);
        let collaboration = Collaboration {
            id,
            idea_id: new.idea_id,
            user_id: new.user_id,
            status: new.status,
            message: new.message,
            created_at: OffsetDateTime::now_utc(),
        };
        self.collaborations.insert(id, collaboration.clone());
        Ok(collaboration)
    }
}

fn matches_query(idea: &Idea, needle: &str) -> bool {
    needle.is_empty()
        || idea.title.to_lowercase().contains(needle)
        || idea.description.to_lowercase().contains(needle)
}

fn matches_tags(idea: &Idea, tags: &[String]) -> bool {
    tags.is_empty() || tags.iter().any(|t| idea.tags.contains(t))
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: Id) -> Option<User> {
        self.tables.read().await.users.get(&id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    async fn list_users(&self) -> Vec<User> {
        self.tables.read().await.users.values().cloned().collect()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let user = self.tables.write().await.insert_user(user)?;
        debug!(user_id = user.id, username = %user.username, "user stored");
        Ok(user)
    }

    async fn list_ideas(&self, viewer: Option<Id>) -> Vec<IdeaWithVotes> {
        self.tables.read().await.ranked_ideas(viewer)
    }

    async fn get_idea(&self, id: Id, viewer: Option<Id>) -> Option<IdeaWithVotes> {
        let tables = self.tables.read().await;
        tables.ideas.get(&id).map(|idea| tables.with_votes(idea, viewer))
    }

    async fn create_idea(&self, idea: NewIdea) -> Result<Idea, StorageError> {
        let idea = self.tables.write().await.insert_idea(idea)?;
        debug!(idea_id = idea.id, user_id = idea.user_id, "idea stored");
        Ok(idea)
    }

    async fn featured_ideas(&self, limit: usize, viewer: Option<Id>) -> Vec<IdeaWithVotes> {
        let mut ideas = self.tables.read().await.ranked_ideas(viewer);
        ideas.truncate(limit);
        ideas
    }

    async fn user_ideas(&self, user_id: Id) -> Vec<IdeaWithVotes> {
        self.tables
            .read()
            .await
            .ranked_ideas(None)
            .into_iter()
            .filter(|i| i.author.id == user_id)
            .collect()
    }

    async fn search_ideas(
        &self,
        query: &str,
        tags: &[String],
        viewer: Option<Id>,
    ) -> Vec<IdeaWithVotes> {
        let needle = query.to_lowercase();
        self.tables
            .read()
            .await
            .ranked_ideas(viewer)
            .into_iter()
            .filter(|i| matches_query(&i.idea, &needle) && matches_tags(&i.idea, tags))
            .collect()
    }

    async fn toggle_vote(&self, vote: NewVote) -> Result<VoteToggle, StorageError> {
        let mut tables = self.tables.write().await;
        tables.ensure_refs(vote.idea_id, vote.user_id)?;
        if tables.delete_vote(vote.user_id, vote.idea_id) {
            debug!(idea_id = vote.idea_id, user_id = vote.user_id, "vote removed");
            return Ok(VoteToggle::Removed {
                idea_id: vote.idea_id,
            });
        }
        let vote = tables.insert_vote(vote)?;
        debug!(vote_id = vote.id, idea_id = vote.idea_id, "vote stored");
        Ok(VoteToggle::Added(vote))
    }

    async fn comments_for_idea(&self, idea_id: Id) -> Vec<CommentWithAuthor> {
        self.tables.read().await.comments_for(idea_id)
    }

    async fn add_comment(&self, comment: NewComment) -> Result<CommentWithAuthor, StorageError> {
        let mut tables = self.tables.write().await;
        let comment = tables.insert_comment(comment)?;
        let author = tables.author(comment.user_id);
        Ok(CommentWithAuthor { comment, author })
    }

    async fn collaborations_for_idea(
        &self,
        idea_id: Id,
    ) -> Result<Vec<Collaboration>, StorageError> {
        let tables = self.tables.read().await;
        if !tables.ideas.contains_key(&idea_id) {
            return Err(StorageError::NotFound("Idea"));
        }
        Ok(tables.collaborations_where(|c| c.idea_id == idea_id))
    }

    async fn collaborations_for_user(&self, user_id: Id) -> Vec<Collaboration> {
        self.tables
            .read()
            .await
            .collaborations_where(|c| c.user_id == user_id)
    }

    async fn add_collaboration(
        &self,
        collaboration: NewCollaboration,
    ) -> Result<Collaboration, StorageError> {
        self.tables.write().await.insert_collaboration(collaboration)
    }

    async fn counts(&self) -> Counts {
        let tables = self.tables.read().await;
        Counts {
            users: tables.users.len(),
            ideas: tables.ideas.len(),
            accepted_collaborations: tables
                .collaborations
                .values()
                .filter(|c| c.status == CollaborationStatus::Accepted)
                .count(),
        }
    }
}
