#![forbid(unsafe_code)]

pub mod announce;
pub mod app_services;
pub mod error;
pub mod loader;
pub mod player;
pub mod post_service;
pub mod rating_service;

pub use drill_core::Clock;

pub use announce::{Announcer, LogAnnouncer, Navigator, StayNavigator};
pub use app_services::{AppServices, LOCAL_USER_ID};
pub use error::{
    AnnounceError, AppServicesError, LoadError, PostServiceError, RatingServiceError,
};
pub use loader::{RepositorySessionLoader, SessionLoader};
pub use player::{PlayerStatus, PlayerView, SessionPlayer};
pub use post_service::PostService;
pub use rating_service::RatingService;
