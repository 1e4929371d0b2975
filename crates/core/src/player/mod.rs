//! Training-session playback: a countdown/work sequencer over an ordered
//! list of drills.
//!
//! This module is pure and synchronous. Wall-clock ticking, speech and
//! navigation live in the services crate, which feeds ticks into
//! [`Player::tick`] and dispatches the returned [`PlayerEvent`]s.

mod config;
mod machine;
mod progress;
mod snapshot;
mod state;

pub use config::{ARC_RADIUS, COUNTDOWN_SECS, PlayerConfig};
pub use machine::{COMPLETION_ANNOUNCEMENT, Player, PlayerError, PlayerEvent};
pub use progress::{ProgressArc, fraction};
pub use snapshot::{PlayerSnapshot, format_clock};
pub use state::{Phase, PlayerState};
