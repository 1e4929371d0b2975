use std::sync::Arc;

use drill_core::PlayerConfig;
use drill_core::model::{Author, UserId};
use storage::repository::{Storage, UserRepository};

use crate::error::AppServicesError;
use crate::loader::{RepositorySessionLoader, SessionLoader};
use crate::post_service::PostService;
use crate::rating_service::RatingService;
use crate::Clock;

/// Id of the local user created on first launch.
pub const LOCAL_USER_ID: UserId = UserId::new(1);
const LOCAL_USER_NAME: &str = "Local Player";

/// Assembles app-facing services and resolves the local user.
#[derive(Clone)]
pub struct AppServices {
    current_user: Author,
    player_config: PlayerConfig,
    posts: Arc<PostService>,
    ratings: Arc<RatingService>,
    loader: Arc<dyn SessionLoader>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or default user
    /// setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        player_config: PlayerConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, player_config).await
    }

    /// Build services over an already-opened storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the local user cannot be
    /// resolved.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        player_config: PlayerConfig,
    ) -> Result<Self, AppServicesError> {
        let current_user = ensure_default_user(storage.users.as_ref()).await?;
        let posts = Arc::new(PostService::new(clock, Arc::clone(&storage.posts)));
        let ratings = Arc::new(RatingService::new(clock, Arc::clone(&storage.ratings)));
        let loader: Arc<dyn SessionLoader> =
            Arc::new(RepositorySessionLoader::new(Arc::clone(&storage.posts)));

        Ok(Self {
            current_user,
            player_config,
            posts,
            ratings,
            loader,
        })
    }

    #[must_use]
    pub fn current_user(&self) -> &Author {
        &self.current_user
    }

    #[must_use]
    pub fn player_config(&self) -> PlayerConfig {
        self.player_config
    }

    #[must_use]
    pub fn posts(&self) -> Arc<PostService> {
        Arc::clone(&self.posts)
    }

    #[must_use]
    pub fn ratings(&self) -> Arc<RatingService> {
        Arc::clone(&self.ratings)
    }

    #[must_use]
    pub fn session_loader(&self) -> Arc<dyn SessionLoader> {
        Arc::clone(&self.loader)
    }
}

async fn ensure_default_user(users: &dyn UserRepository) -> Result<Author, AppServicesError> {
    if let Some(user) = users.get_user(LOCAL_USER_ID).await? {
        return Ok(user);
    }
    let user = Author {
        id: LOCAL_USER_ID,
        name: LOCAL_USER_NAME.to_string(),
        image: None,
    };
    users.upsert_user(&user).await?;
    tracing::info!(user_id = %user.id, "created local user");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{DrillDraft, PostDraft, PostFilter};
    use drill_core::time::fixed_clock;

    #[tokio::test]
    async fn bootstraps_local_user_once() {
        let storage = Storage::in_memory();
        let first = AppServices::from_storage(storage.clone(), fixed_clock(), PlayerConfig::default())
            .await
            .unwrap();
        let second = AppServices::from_storage(storage, fixed_clock(), PlayerConfig::default())
            .await
            .unwrap();
        assert_eq!(first.current_user(), second.current_user());
        assert_eq!(first.current_user().id, LOCAL_USER_ID);
    }

    #[tokio::test]
    async fn created_posts_are_visible_to_the_loader() {
        let services =
            AppServices::from_storage(Storage::in_memory(), fixed_clock(), PlayerConfig::default())
                .await
                .unwrap();
        let draft = PostDraft {
            title: "Volley drives".into(),
            description: "Keep it high".into(),
            drills: vec![DrillDraft {
                title: "Volleys".into(),
                description: "Cross court".into(),
                duration: "45".into(),
                steps: vec!["Split step".into(), String::new()],
            }],
            ..PostDraft::default()
        };
        let id = services
            .posts()
            .create_post(&draft, services.current_user())
            .await
            .unwrap();

        let listed = services.posts().list_posts(&PostFilter::default(), 10).await.unwrap();
        assert_eq!(listed.len(), 1);

        let loaded = services.session_loader().load(id).await.unwrap();
        assert_eq!(loaded.drills()[0].work_duration_secs(), 45);
        assert_eq!(loaded.drills()[0].steps(), ["Split step"]);
    }
}
