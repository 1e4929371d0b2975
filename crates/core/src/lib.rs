#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod player;
pub mod time;

pub use error::Error;
pub use player::{
    Phase, Player, PlayerConfig, PlayerError, PlayerEvent, PlayerSnapshot, PlayerState,
    ProgressArc,
};
pub use time::Clock;
