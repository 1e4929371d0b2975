use std::time::Duration;

use crate::model::Drill;

/// Lead-in before every drill.
pub const COUNTDOWN_SECS: u32 = 5;

/// Radius of the circular timer, in view units.
pub const ARC_RADIUS: f64 = 80.0;

/// Timing knobs for the session player.
///
/// All durations are strictly positive; the setters clamp to at least one
/// second so a phase can never be zero-length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    countdown_secs: u32,
    tick_interval: Duration,
    arc_radius: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            countdown_secs: COUNTDOWN_SECS,
            tick_interval: Duration::from_secs(1),
            arc_radius: ARC_RADIUS,
        }
    }
}

impl PlayerConfig {
    #[must_use]
    pub fn with_countdown_secs(mut self, secs: u32) -> Self {
        self.countdown_secs = secs.max(1);
        self
    }

    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    #[must_use]
    pub fn with_arc_radius(mut self, radius: f64) -> Self {
        if radius.is_finite() && radius > 0.0 {
            self.arc_radius = radius;
        }
        self
    }

    #[must_use]
    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn arc_radius(&self) -> f64 {
        self.arc_radius
    }

    /// Work phase length for a drill. Zero or missing durations fall back to
    /// the drill default, the same value post totals and labels use.
    #[must_use]
    pub fn work_secs(&self, drill: &Drill) -> u32 {
        drill.work_duration_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DrillId;

    #[test]
    fn setters_never_allow_zero() {
        let config = PlayerConfig::default()
            .with_countdown_secs(0)
            .with_tick_interval(Duration::ZERO)
            .with_arc_radius(-1.0);
        assert_eq!(config.countdown_secs(), 1);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
        assert!((config.arc_radius() - ARC_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn work_secs_applies_default() {
        let config = PlayerConfig::default();
        let zero = Drill::new(DrillId::new(1), "Lunges", "", Some(0), Vec::new());
        let set = Drill::new(DrillId::new(2), "Sprints", "", Some(10), Vec::new());
        assert_eq!(config.work_secs(&zero), 30);
        assert_eq!(config.work_secs(&set), 10);
        assert_eq!(config.work_secs(&zero), zero.work_duration_secs());
    }
}
