#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    InMemoryRepository, PostRepository, RatingRepository, Storage, StorageError, UserRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
