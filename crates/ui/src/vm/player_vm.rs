use drill_core::{PlayerSnapshot, ProgressArc};
use services::{PlayerStatus, PlayerView};

const ARC_STROKE: f64 = 10.0;

/// SVG geometry for the circular countdown.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerArcVm {
    pub size: f64,
    pub center: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub dash_array: String,
    pub dash_offset: String,
}

impl TimerArcVm {
    #[must_use]
    pub fn new(arc: ProgressArc) -> Self {
        let size = 2.0 * (arc.radius() + ARC_STROKE);
        Self {
            size,
            center: size / 2.0,
            radius: arc.radius(),
            stroke_width: ARC_STROKE,
            dash_array: format!("{:.2}", arc.circumference()),
            dash_offset: format!("{:.2}", arc.dash_offset()),
        }
    }
}

/// The running player panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerPanelVm {
    pub session_title: String,
    pub drill_title: String,
    pub drill_label: String,
    pub phase_label: &'static str,
    pub time_label: String,
    pub play_label: &'static str,
    pub can_toggle: bool,
    pub can_skip_forward: bool,
    pub can_skip_backward: bool,
    pub arc: TimerArcVm,
}

impl PlayerPanelVm {
    #[must_use]
    pub fn new(session_title: &str, snapshot: &PlayerSnapshot, arc_radius: f64) -> Self {
        let phase_label = if snapshot.is_finished {
            "Done"
        } else {
            snapshot.phase.label()
        };
        Self {
            session_title: session_title.to_string(),
            drill_title: snapshot.current_drill_title.clone(),
            drill_label: format!("Drill {}", snapshot.drill_position_label),
            phase_label,
            time_label: snapshot.time_left_formatted.clone(),
            play_label: if snapshot.is_playing { "Pause" } else { "Play" },
            can_toggle: !snapshot.is_finished,
            can_skip_forward: snapshot.can_skip_forward,
            can_skip_backward: snapshot.can_skip_backward,
            arc: TimerArcVm::new(ProgressArc::new(arc_radius, snapshot.progress_fraction)),
        }
    }
}

/// What the training screen shows.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerScreenVm {
    Loading,
    Failed(String),
    NoDrills,
    Panel(PlayerPanelVm),
}

impl PlayerScreenVm {
    #[must_use]
    pub fn from_view(view: &PlayerView, arc_radius: f64) -> Self {
        match &view.status {
            PlayerStatus::Idle | PlayerStatus::Loading => Self::Loading,
            PlayerStatus::Failed(message) => Self::Failed(message.clone()),
            PlayerStatus::NoDrills => Self::NoDrills,
            PlayerStatus::Ready | PlayerStatus::Finished => match &view.snapshot {
                Some(snapshot) => Self::Panel(PlayerPanelVm::new(
                    view.session_title.as_deref().unwrap_or_default(),
                    snapshot,
                    arc_radius,
                )),
                None => Self::Loading,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::Phase;

    fn snapshot(is_playing: bool, fraction: f64) -> PlayerSnapshot {
        PlayerSnapshot {
            current_drill_title: "Sprints".into(),
            phase: Phase::Countdown,
            time_left_secs: 5,
            time_left_formatted: "00:05".into(),
            progress_fraction: fraction,
            drill_index: 0,
            drill_count: 2,
            drill_position_label: "1 of 2".into(),
            is_playing,
            is_finished: false,
            can_skip_forward: true,
            can_skip_backward: false,
        }
    }

    fn view(status: PlayerStatus, snapshot: Option<PlayerSnapshot>) -> PlayerView {
        PlayerView {
            status,
            post_id: None,
            session_title: Some("Leg day".into()),
            snapshot,
        }
    }

    #[test]
    fn panel_labels() {
        let screen = PlayerScreenVm::from_view(
            &view(PlayerStatus::Ready, Some(snapshot(false, 1.0))),
            80.0,
        );
        let PlayerScreenVm::Panel(panel) = screen else {
            panic!("expected panel, got {screen:?}");
        };
        assert_eq!(panel.session_title, "Leg day");
        assert_eq!(panel.drill_label, "Drill 1 of 2");
        assert_eq!(panel.phase_label, "Get ready");
        assert_eq!(panel.time_label, "00:05");
        assert_eq!(panel.play_label, "Play");
        assert!(panel.can_skip_forward);
        assert!(!panel.can_skip_backward);
        assert_eq!(panel.arc.dash_offset, "0.00");
        assert!((panel.arc.size - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pause_label_and_shrinking_arc() {
        let panel = PlayerPanelVm::new("Leg day", &snapshot(true, 0.5), 80.0);
        assert_eq!(panel.play_label, "Pause");
        let circumference: f64 = panel.arc.dash_array.parse().unwrap();
        let offset: f64 = panel.arc.dash_offset.parse().unwrap();
        assert!((offset - circumference / 2.0).abs() < 0.01);
    }

    #[test]
    fn non_ready_states() {
        assert_eq!(
            PlayerScreenVm::from_view(&view(PlayerStatus::Loading, None), 80.0),
            PlayerScreenVm::Loading
        );
        assert_eq!(
            PlayerScreenVm::from_view(&view(PlayerStatus::NoDrills, None), 80.0),
            PlayerScreenVm::NoDrills
        );
        assert_eq!(
            PlayerScreenVm::from_view(&view(PlayerStatus::Failed("gone".into()), None), 80.0),
            PlayerScreenVm::Failed("gone".into())
        );
    }
}
