use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of a drill the clock is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Fixed lead-in before the drill starts.
    Countdown,
    /// The drill itself.
    Work,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Countdown => "Get ready",
            Phase::Work => "Work",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Countdown => f.write_str("countdown"),
            Phase::Work => f.write_str("work"),
        }
    }
}

/// Mutable playback position. Owned exclusively by a [`super::Player`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_drill_index: usize,
    pub phase: Phase,
    pub time_left_secs: u32,
    pub is_playing: bool,
}

impl PlayerState {
    /// Paused at the start of the first drill's countdown.
    #[must_use]
    pub fn initial(countdown_secs: u32) -> Self {
        Self::countdown_at(0, countdown_secs)
    }

    /// Paused at the start of the given drill's countdown.
    #[must_use]
    pub fn countdown_at(index: usize, countdown_secs: u32) -> Self {
        Self {
            current_drill_index: index,
            phase: Phase::Countdown,
            time_left_secs: countdown_secs,
            is_playing: false,
        }
    }
}
