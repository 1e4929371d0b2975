use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drill_core::model::{
    Author, Drill, DrillId, NewPost, Post, PostId, Rating, RatingScore, RatingSummary, UserId,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for training session posts and their drills.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a validated post with its drills in order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the author does not exist, or other
    /// storage errors.
    async fn insert_post(
        &self,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, StorageError>;

    /// Fetch a post with its drills and rating summary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures. A missing post is `Ok(None)`.
    async fn get_post(&self, id: PostId) -> Result<Option<Post>, StorageError>;

    /// List posts newest first, skipping the first `offset`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<Post>, StorageError>;

    /// Delete a post together with its drills and ratings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such post exists.
    async fn delete_post(&self, id: PostId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the user cannot be stored.
    async fn upsert_user(&self, user: &Author) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn get_user(&self, id: UserId) -> Result<Option<Author>, StorageError>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Store a rating. A user rating the same post again replaces their
    /// earlier score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the post or user does not exist.
    async fn upsert_rating(&self, rating: &Rating) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn rating_summary(&self, post_id: PostId) -> Result<RatingSummary, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct StoredPost {
    post: NewPost,
    drill_ids: Vec<DrillId>,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, Author>,
    posts: BTreeMap<PostId, StoredPost>,
    ratings: HashMap<(PostId, UserId), Rating>,
    next_post_id: u64,
    next_drill_id: u64,
}

impl Inner {
    fn summary(&self, post_id: PostId) -> RatingSummary {
        let scores: Vec<RatingScore> = self
            .ratings
            .values()
            .filter(|r| r.post_id == post_id)
            .map(|r| r.score)
            .collect();
        RatingSummary::from_scores(&scores)
    }

    fn hydrate(&self, id: PostId, stored: &StoredPost) -> Result<Post, StorageError> {
        let author = self
            .users
            .get(&stored.post.author)
            .cloned()
            .ok_or_else(|| StorageError::Serialization(format!("missing author for post {id}")))?;
        let drills = stored
            .post
            .drills
            .iter()
            .zip(&stored.drill_ids)
            .map(|(d, drill_id)| {
                Drill::new(
                    *drill_id,
                    d.title.clone(),
                    d.description.clone(),
                    d.duration_secs,
                    d.steps.clone(),
                )
            })
            .collect();
        Ok(Post::from_persisted(
            id,
            stored.post.title.clone(),
            stored.post.description.clone(),
            author,
            stored.post.player_count,
            stored.post.ball_type,
            stored.post.intensity,
            stored.post.tags.clone(),
            drills,
            self.summary(id),
            stored.created_at,
        ))
    }
}

/// Simple in-memory repository implementation for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn insert_post(
        &self,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, StorageError> {
        let mut guard = self.lock()?;
        if !guard.users.contains_key(&post.author) {
            return Err(StorageError::NotFound);
        }
        guard.next_post_id += 1;
        let id = PostId::new(guard.next_post_id);
        let mut drill_ids = Vec::with_capacity(post.drills.len());
        for _ in &post.drills {
            guard.next_drill_id += 1;
            drill_ids.push(DrillId::new(guard.next_drill_id));
        }
        guard.posts.insert(
            id,
            StoredPost {
                post: post.clone(),
                drill_ids,
                created_at,
            },
        );
        Ok(id)
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>, StorageError> {
        let guard = self.lock()?;
        guard
            .posts
            .get(&id)
            .map(|stored| guard.hydrate(id, stored))
            .transpose()
    }

    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<Post>, StorageError> {
        let guard = self.lock()?;
        let mut entries: Vec<_> = guard.posts.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| b_id.cmp(a_id))
        });
        entries
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|(id, stored)| guard.hydrate(*id, stored))
            .collect()
    }

    async fn delete_post(&self, id: PostId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if guard.posts.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        guard.ratings.retain(|(post_id, _), _| *post_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn upsert_user(&self, user: &Author) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<Author>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.users.get(&id).cloned())
    }
}

#[async_trait]
impl RatingRepository for InMemoryRepository {
    async fn upsert_rating(&self, rating: &Rating) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        if !guard.posts.contains_key(&rating.post_id) || !guard.users.contains_key(&rating.user_id)
        {
            return Err(StorageError::NotFound);
        }
        guard
            .ratings
            .insert((rating.post_id, rating.user_id), rating.clone());
        Ok(())
    }

    async fn rating_summary(&self, post_id: PostId) -> Result<RatingSummary, StorageError> {
        let guard = self.lock()?;
        Ok(guard.summary(post_id))
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub ratings: Arc<dyn RatingRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            posts: Arc::new(repo.clone()),
            users: Arc::new(repo.clone()),
            ratings: Arc::new(repo),
        }
    }
}
