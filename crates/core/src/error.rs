use thiserror::Error;

use crate::model::{DrillError, PostError, RatingError};
use crate::player::PlayerError;

/// Any failure raised by the domain layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Drill(#[from] DrillError),
    #[error(transparent)]
    Post(#[from] PostError),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Player(#[from] PlayerError),
}
