use std::sync::Arc;

use drill_core::model::{Author, Post, PostDraft, PostFilter, PostId};
use storage::repository::{PostRepository, StorageError};

use crate::error::PostServiceError;
use crate::Clock;

/// Page size, as a multiple of `limit`, when a filter is applied in memory.
const FILTER_SCAN_FACTOR: u32 = 4;

/// Browsing, authoring and deletion of training sessions.
#[derive(Clone)]
pub struct PostService {
    clock: Clock,
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    #[must_use]
    pub fn new(clock: Clock, posts: Arc<dyn PostRepository>) -> Self {
        Self { clock, posts }
    }

    /// List sessions newest first, keeping at most `limit` that match `filter`.
    ///
    /// # Errors
    ///
    /// Returns `PostServiceError::Storage` if repository access fails.
    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        limit: u32,
    ) -> Result<Vec<Post>, PostServiceError> {
        if filter.is_empty() {
            return Ok(self.posts.list_posts(limit, 0).await?);
        }
        let wanted = limit as usize;
        let page_size = limit.saturating_mul(FILTER_SCAN_FACTOR).max(1);
        let mut offset = 0u32;
        let mut matched = Vec::new();
        while matched.len() < wanted {
            let page = self.posts.list_posts(page_size, offset).await?;
            let exhausted = page.len() < page_size as usize;
            matched.extend(page.into_iter().filter(|post| filter.matches(post)));
            if exhausted {
                break;
            }
            offset = offset.saturating_add(page_size);
        }
        matched.truncate(wanted);
        Ok(matched)
    }

    /// Fetch one session with its drills and rating.
    ///
    /// # Errors
    ///
    /// Returns `PostServiceError::NotFound` for unknown ids.
    pub async fn get_post(&self, id: PostId) -> Result<Post, PostServiceError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or(PostServiceError::NotFound(id))
    }

    /// Validate a draft and publish it under `author`.
    ///
    /// # Errors
    ///
    /// Returns `PostServiceError::Post` for validation failures and
    /// `PostServiceError::Storage` if persistence fails.
    pub async fn create_post(
        &self,
        draft: &PostDraft,
        author: &Author,
    ) -> Result<PostId, PostServiceError> {
        let post = draft.validate(author.id)?;
        let id = self.posts.insert_post(&post, self.clock.now()).await?;
        tracing::info!(post_id = %id, drills = post.drills.len(), "training session created");
        Ok(id)
    }

    /// Delete a session together with its drills and ratings.
    ///
    /// # Errors
    ///
    /// Returns `PostServiceError::NotFound` if the session does not exist.
    pub async fn delete_post(&self, id: PostId) -> Result<(), PostServiceError> {
        match self.posts.delete_post(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "training session deleted");
                Ok(())
            }
            Err(StorageError::NotFound) => Err(PostServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
