use serde::Serialize;

use super::machine::Player;
use super::state::Phase;

/// Everything a view needs to draw the player, recomputed after every
/// transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub current_drill_title: String,
    pub phase: Phase,
    pub time_left_secs: u32,
    pub time_left_formatted: String,
    pub progress_fraction: f64,
    pub drill_index: usize,
    pub drill_count: usize,
    pub drill_position_label: String,
    pub is_playing: bool,
    pub is_finished: bool,
    pub can_skip_forward: bool,
    pub can_skip_backward: bool,
}

impl PlayerSnapshot {
    #[must_use]
    pub fn from_player(player: &Player) -> Self {
        let state = player.state();
        let drill_count = player.drills().len();
        Self {
            current_drill_title: player.current_drill().title().to_string(),
            phase: state.phase,
            time_left_secs: state.time_left_secs,
            time_left_formatted: format_clock(state.time_left_secs),
            progress_fraction: player.progress_fraction(),
            drill_index: state.current_drill_index,
            drill_count,
            drill_position_label: format!("{} of {drill_count}", state.current_drill_index + 1),
            is_playing: state.is_playing,
            is_finished: player.is_finished(),
            can_skip_forward: player.can_skip_forward(),
            can_skip_backward: player.can_skip_backward(),
        }
    }
}

/// Zero-padded `mm:ss`. Minutes keep growing past 99.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
