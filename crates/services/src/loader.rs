use std::sync::Arc;

use async_trait::async_trait;
use drill_core::model::{Post, PostId};
use storage::repository::PostRepository;

use crate::error::LoadError;

/// Fetches a session by id for the player.
#[async_trait]
pub trait SessionLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` for unknown ids, `LoadError::Network` when
    /// the store cannot be reached.
    async fn load(&self, id: PostId) -> Result<Post, LoadError>;
}

/// Loads sessions straight from a `PostRepository`.
#[derive(Clone)]
pub struct RepositorySessionLoader {
    posts: Arc<dyn PostRepository>,
}

impl RepositorySessionLoader {
    #[must_use]
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl SessionLoader for RepositorySessionLoader {
    async fn load(&self, id: PostId) -> Result<Post, LoadError> {
        self.posts
            .get_post(id)
            .await
            .map_err(|err| LoadError::from_storage(id, err))?
            .ok_or(LoadError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Author, NewDrill, NewPost, UserId};
    use drill_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, UserRepository};

    #[tokio::test]
    async fn loads_existing_and_reports_missing() {
        let repo = InMemoryRepository::new();
        repo.upsert_user(&Author {
            id: UserId::new(1),
            name: "Coach".into(),
            image: None,
        })
        .await
        .unwrap();
        let id = repo
            .insert_post(
                &NewPost {
                    author: UserId::new(1),
                    title: "Ghosting".into(),
                    description: None,
                    player_count: Default::default(),
                    ball_type: Default::default(),
                    intensity: Default::default(),
                    tags: Vec::new(),
                    drills: vec![NewDrill {
                        title: "Ghost".into(),
                        description: "Six corners".into(),
                        duration_secs: Some(60),
                        steps: Vec::new(),
                    }],
                },
                fixed_now(),
            )
            .await
            .unwrap();

        let loader = RepositorySessionLoader::new(Arc::new(repo));
        let post = loader.load(id).await.unwrap();
        assert_eq!(post.drills().len(), 1);

        let missing = PostId::new(42);
        assert_eq!(
            loader.load(missing).await.unwrap_err(),
            LoadError::NotFound(missing)
        );
    }
}
