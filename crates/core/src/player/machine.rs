use thiserror::Error;

use crate::model::Drill;

use super::config::PlayerConfig;
use super::progress::{ProgressArc, fraction};
use super::snapshot::PlayerSnapshot;
use super::state::{Phase, PlayerState};

/// Spoken when the last drill's work phase ends.
pub const COMPLETION_ANNOUNCEMENT: &str = "Training session complete!";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerError {
    #[error("session has no drills to play")]
    NoDrills,
}

/// Side effects requested by a state transition.
///
/// The machine never performs I/O itself; the caller dispatches these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Speak the given text. Fire-and-forget.
    Announce(String),
    /// A new `(drill, phase)` pair became active.
    PhaseStarted { drill_index: usize, phase: Phase },
    /// The final work phase ran out. The caller should leave the player.
    Finished,
}

/// Countdown/work sequencer for one loaded session.
///
/// `tick` is the only way time moves forward, and it only does so while
/// playing. Transport controls reset to a paused countdown.
#[derive(Debug, Clone)]
pub struct Player {
    drills: Vec<Drill>,
    config: PlayerConfig,
    state: PlayerState,
    finished: bool,
}

impl Player {
    /// Load a session, paused at the first drill's countdown.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NoDrills` for an empty session; such a session
    /// must not be played at all.
    pub fn new(drills: Vec<Drill>, config: PlayerConfig) -> Result<Self, PlayerError> {
        if drills.is_empty() {
            return Err(PlayerError::NoDrills);
        }
        Ok(Self {
            drills,
            state: PlayerState::initial(config.countdown_secs()),
            config,
            finished: false,
        })
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    #[must_use]
    pub fn current_drill(&self) -> &Drill {
        // Index is kept in bounds by every transition.
        &self.drills[self.state.current_drill_index]
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn can_skip_forward(&self) -> bool {
        !self.finished && self.state.current_drill_index + 1 < self.drills.len()
    }

    #[must_use]
    pub fn can_skip_backward(&self) -> bool {
        !self.finished && self.state.current_drill_index > 0
    }

    /// Full length of the active phase. Always at least one second.
    #[must_use]
    pub fn phase_duration_secs(&self) -> u32 {
        match self.state.phase {
            Phase::Countdown => self.config.countdown_secs(),
            Phase::Work => self.config.work_secs(self.current_drill()),
        }
    }

    /// Remaining share of the active phase, in `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        fraction(self.state.time_left_secs, self.phase_duration_secs())
    }

    #[must_use]
    pub fn progress_arc(&self) -> ProgressArc {
        ProgressArc::from_time(
            self.config.arc_radius(),
            self.state.time_left_secs,
            self.phase_duration_secs(),
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::from_player(self)
    }

    /// Advance the clock by one tick.
    ///
    /// Reads the live state: a tick arriving while paused or after the
    /// session finished does nothing. At most one phase transition happens
    /// per call.
    pub fn tick(&mut self) -> Vec<PlayerEvent> {
        if self.finished || !self.state.is_playing {
            return Vec::new();
        }
        if self.state.time_left_secs > 1 {
            self.state.time_left_secs -= 1;
            return Vec::new();
        }
        self.advance_phase()
    }

    fn advance_phase(&mut self) -> Vec<PlayerEvent> {
        let index = self.state.current_drill_index;
        match self.state.phase {
            Phase::Countdown => {
                let drill = &self.drills[index];
                let title = drill.title().to_string();
                self.state.phase = Phase::Work;
                self.state.time_left_secs = self.config.work_secs(drill);
                vec![
                    PlayerEvent::PhaseStarted {
                        drill_index: index,
                        phase: Phase::Work,
                    },
                    PlayerEvent::Announce(title),
                ]
            }
            Phase::Work if index + 1 < self.drills.len() => {
                self.state.current_drill_index = index + 1;
                self.state.phase = Phase::Countdown;
                self.state.time_left_secs = self.config.countdown_secs();
                vec![PlayerEvent::PhaseStarted {
                    drill_index: index + 1,
                    phase: Phase::Countdown,
                }]
            }
            Phase::Work => {
                self.state.time_left_secs = 0;
                self.state.is_playing = false;
                self.finished = true;
                vec![
                    PlayerEvent::Announce(COMPLETION_ANNOUNCEMENT.to_string()),
                    PlayerEvent::Finished,
                ]
            }
        }
    }

    /// Flip between playing and paused. Returns the new `is_playing`.
    ///
    /// A finished session stays stopped.
    pub fn toggle_play_pause(&mut self) -> bool {
        if !self.finished {
            self.state.is_playing = !self.state.is_playing;
        }
        self.state.is_playing
    }

    pub fn play(&mut self) {
        if !self.finished {
            self.state.is_playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    /// Jump to the next drill's countdown and pause. No-op on the last drill.
    ///
    /// Returns whether the state changed.
    pub fn skip_forward(&mut self) -> bool {
        if !self.can_skip_forward() {
            return false;
        }
        self.state = PlayerState::countdown_at(
            self.state.current_drill_index + 1,
            self.config.countdown_secs(),
        );
        true
    }

    /// Jump to the previous drill's countdown and pause. No-op on the first
    /// drill.
    ///
    /// Returns whether the state changed.
    pub fn skip_backward(&mut self) -> bool {
        if !self.can_skip_backward() {
            return false;
        }
        self.state = PlayerState::countdown_at(
            self.state.current_drill_index - 1,
            self.config.countdown_secs(),
        );
        true
    }
}
