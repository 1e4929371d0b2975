//! Wall-clock driver for the training-session player.

mod driver;
mod ticker;

pub use driver::{PlayerStatus, PlayerView, SessionPlayer};
