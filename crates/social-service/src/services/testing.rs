//! In-memory repositories for service tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use social_common::JwtService;
use social_core::entities::{Comment, Post, Reaction, User};
use social_core::traits::{
    CommentRepository, FeedQuery, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
use social_core::{
    next_reaction, DomainError, ReactionCounts, ReactionType, Snowflake, SnowflakeGenerator, Subject, SubjectKind,
};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct Tables {
    users: HashMap<Snowflake, (User, String)>,
    posts: HashMap<Snowflake, Post>,
    comments: HashMap<Snowflake, Comment>,
    reactions: HashMap<(Subject, Snowflake), Reaction>,
}

impl Tables {
    fn subject_exists(&self, subject: Subject) -> bool {
        match subject.kind {
            SubjectKind::Post => self.posts.contains_key(&subject.id),
            SubjectKind::Comment => self.comments.contains_key(&subject.id),
        }
    }
}

/// One store behind all four repository traits, so cascades can be observed
#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub(crate) fn comment_count(&self, post_id: Snowflake) -> usize {
        self.tables
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count()
    }

    pub(crate) fn reaction_count(&self) -> usize {
        self.tables.lock().reactions.len()
    }

    fn matching(&self, query: &str) -> Vec<User> {
        let query = query.to_lowercase();
        self.tables
            .lock()
            .users
            .values()
            .filter(|(u, _)| u.username.to_lowercase().contains(&query))
            .map(|(u, _)| u.clone())
            .collect()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().users.get(&id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.users.values().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        tables
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.tables.lock().users.get(&id).map(|(_, h)| h.clone()))
    }

    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, User>> {
        let tables = self.tables.lock();
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).map(|(u, _)| (*id, u.clone())))
            .collect())
    }

    async fn search(&self, query: &str, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let mut users = self.matching(query);
        users.sort_by(|a, b| {
            a.username
                .to_lowercase()
                .cmp(&b.username.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_matching(&self, query: &str) -> RepoResult<i64> {
        Ok(self.matching(query).len() as i64)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.tables.lock().posts.get(&id).cloned())
    }

    async fn find_feed(&self, query: FeedQuery) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .tables
            .lock()
            .posts
            .values()
            .filter(|p| query.before.map_or(true, |before| p.id < before))
            .filter(|p| query.author_id.map_or(true, |author| p.author_id == author))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts.truncate(query.limit.clamp(1, 100) as usize);
        Ok(posts)
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.tables.lock().posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        match self.tables.lock().posts.get_mut(&post.id) {
            Some(stored) => {
                *stored = post.clone();
                Ok(())
            }
            None => Err(DomainError::PostNotFound(post.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.posts.remove(&id).is_none() {
            return Err(DomainError::PostNotFound(id));
        }
        let comments: Vec<Snowflake> = tables
            .comments
            .values()
            .filter(|c| c.post_id == id)
            .map(|c| c.id)
            .collect();
        tables.comments.retain(|_, c| c.post_id != id);
        tables.reactions.retain(|(subject, _), _| {
            *subject != Subject::post(id)
                && !(subject.kind == SubjectKind::Comment && comments.contains(&subject.id))
        });
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.tables.lock().comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .tables
            .lock()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.id);
        Ok(comments)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        match self.tables.lock().comments.get_mut(&comment.id) {
            Some(stored) => {
                *stored = comment.clone();
                Ok(())
            }
            None => Err(DomainError::CommentNotFound(comment.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if tables.comments.remove(&id).is_none() {
            return Err(DomainError::CommentNotFound(id));
        }
        tables
            .reactions
            .retain(|(subject, _), _| *subject != Subject::comment(id));
        Ok(())
    }

    async fn count_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<HashMap<Snowflake, i64>> {
        let tables = self.tables.lock();
        let mut counts = HashMap::new();
        for comment in tables.comments.values() {
            if post_ids.contains(&comment.post_id) {
                *counts.entry(comment.post_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, subject: Subject, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        Ok(self.tables.lock().reactions.get(&(subject, user_id)).cloned())
    }

    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut tables = self.tables.lock();
        if !tables.subject_exists(reaction.subject) {
            return Err(reaction.subject.not_found());
        }
        tables
            .reactions
            .insert((reaction.subject, reaction.user_id), reaction.clone());
        Ok(())
    }

    async fn toggle(
        &self,
        subject: Subject,
        user_id: Snowflake,
        requested: ReactionType,
    ) -> RepoResult<Option<ReactionType>> {
        let mut tables = self.tables.lock();
        if !tables.subject_exists(subject) {
            return Err(subject.not_found());
        }
        let current = tables
            .reactions
            .get(&(subject, user_id))
            .map(|r| r.reaction_type);
        let next = next_reaction(current, requested);
        match next {
            Some(t) => {
                tables
                    .reactions
                    .insert((subject, user_id), Reaction::new(subject, user_id, t));
            }
            None => {
                tables.reactions.remove(&(subject, user_id));
            }
        }
        Ok(next)
    }

    async fn delete(&self, subject: Subject, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .tables
            .lock()
            .reactions
            .remove(&(subject, user_id))
            .is_some())
    }

    async fn count_by_type(&self, subject: Subject) -> RepoResult<ReactionCounts> {
        Ok(ReactionCounts::tally(
            self.tables
                .lock()
                .reactions
                .values()
                .filter(|r| r.subject == subject)
                .map(|r| r.reaction_type),
        ))
    }

    async fn count_many(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, ReactionCounts>> {
        let tables = self.tables.lock();
        let mut counts: HashMap<Snowflake, ReactionCounts> = HashMap::new();
        for reaction in tables.reactions.values() {
            if reaction.subject.kind == kind && ids.contains(&reaction.subject.id) {
                counts
                    .entry(reaction.subject.id)
                    .or_default()
                    .increment(reaction.reaction_type);
            }
        }
        Ok(counts)
    }

    async fn find_many_for_user(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<HashMap<Snowflake, ReactionType>> {
        Ok(self
            .tables
            .lock()
            .reactions
            .values()
            .filter(|r| r.subject.kind == kind && r.user_id == user_id && ids.contains(&r.subject.id))
            .map(|r| (r.subject.id, r.reaction_type))
            .collect())
    }
}

/// Reaction repository that yields to the scheduler before every call, so
/// concurrent service calls interleave at each repository boundary
pub(crate) struct YieldingReactions(pub Arc<MemoryStore>);

#[async_trait]
impl ReactionRepository for YieldingReactions {
    async fn find(&self, subject: Subject, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        tokio::task::yield_now().await;
        self.0.find(subject, user_id).await
    }

    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        tokio::task::yield_now().await;
        self.0.upsert(reaction).await
    }

    async fn toggle(
        &self,
        subject: Subject,
        user_id: Snowflake,
        requested: ReactionType,
    ) -> RepoResult<Option<ReactionType>> {
        tokio::task::yield_now().await;
        self.0.toggle(subject, user_id, requested).await
    }

    async fn delete(&self, subject: Subject, user_id: Snowflake) -> RepoResult<bool> {
        tokio::task::yield_now().await;
        ReactionRepository::delete(self.0.as_ref(), subject, user_id).await
    }

    async fn count_by_type(&self, subject: Subject) -> RepoResult<ReactionCounts> {
        tokio::task::yield_now().await;
        self.0.count_by_type(subject).await
    }

    async fn count_many(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
    ) -> RepoResult<HashMap<Snowflake, ReactionCounts>> {
        tokio::task::yield_now().await;
        self.0.count_many(kind, ids).await
    }

    async fn find_many_for_user(
        &self,
        kind: SubjectKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<HashMap<Snowflake, ReactionType>> {
        tokio::task::yield_now().await;
        self.0.find_many_for_user(kind, ids, user_id).await
    }
}

pub(crate) struct Fixture {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    ids: Arc<SnowflakeGenerator>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::with_reactions(store.clone(), store)
    }

    /// Reactions go through [`YieldingReactions`]
    pub fn yielding() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::with_reactions(store.clone(), Arc::new(YieldingReactions(store)))
    }

    fn with_reactions(store: Arc<MemoryStore>, reactions: Arc<dyn ReactionRepository>) -> Self {
        let ids = Arc::new(SnowflakeGenerator::new(1));
        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .post_repo(store.clone())
            .comment_repo(store.clone())
            .reaction_repo(reactions)
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 3600)))
            .snowflake_generator(ids.clone())
            .build()
            .unwrap();
        Self { ctx, store, ids }
    }

    pub async fn user(&self, name: &str) -> Snowflake {
        let user = User::new(self.ids.generate(), name.to_string(), format!("{name}@example.com"));
        UserRepository::create(self.store.as_ref(), &user, "hash")
            .await
            .unwrap();
        user.id
    }

    pub async fn post(&self, author: Snowflake) -> Snowflake {
        let post = Post::new(self.ids.generate(), author, "a post", None).unwrap();
        PostRepository::create(self.store.as_ref(), &post).await.unwrap();
        post.id
    }

    pub async fn comment(&self, post: Snowflake, author: Snowflake, text: &str) -> Snowflake {
        let comment = Comment::new(self.ids.generate(), post, author, text).unwrap();
        CommentRepository::create(self.store.as_ref(), &comment)
            .await
            .unwrap();
        comment.id
    }
}
