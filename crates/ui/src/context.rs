use std::sync::Arc;

use drill_core::PlayerConfig;
use drill_core::model::Author;
use services::{Announcer, Navigator, PostService, RatingService, SessionLoader, SessionPlayer};

pub trait UiApp: Send + Sync {
    fn current_user(&self) -> Author;
    fn player_config(&self) -> PlayerConfig;

    fn posts(&self) -> Arc<PostService>;
    fn ratings(&self) -> Arc<RatingService>;
    fn session_loader(&self) -> Arc<dyn SessionLoader>;
    fn announcer(&self) -> Arc<dyn Announcer>;
}

#[derive(Clone)]
pub struct AppContext {
    current_user: Author,
    player_config: PlayerConfig,

    posts: Arc<PostService>,
    ratings: Arc<RatingService>,
    session_loader: Arc<dyn SessionLoader>,
    announcer: Arc<dyn Announcer>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            current_user: app.current_user(),
            player_config: app.player_config(),
            posts: app.posts(),
            ratings: app.ratings(),
            session_loader: app.session_loader(),
            announcer: app.announcer(),
        }
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

    /// A player owned by one training view.
    #[must_use]
    pub fn session_player(&self, navigator: Arc<dyn Navigator>) -> SessionPlayer {
        SessionPlayer::new(
            Arc::clone(&self.session_loader),
            Arc::clone(&self.announcer),
            navigator,
            self.player_config,
        )
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
