use std::f64::consts::PI;

/// Geometry of the circular countdown indicator.
///
/// The arc shrinks from a full circle at the start of a phase to nothing when
/// the phase runs out. Rendered as an SVG stroke with
/// `stroke-dasharray = circumference` and `stroke-dashoffset = dash_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressArc {
    radius: f64,
    fraction: f64,
}

impl ProgressArc {
    #[must_use]
    pub fn new(radius: f64, fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { radius, fraction }
    }

    /// Builds the arc from remaining and total time. A zero total yields an
    /// empty arc rather than dividing by zero.
    #[must_use]
    pub fn from_time(radius: f64, time_left_secs: u32, total_secs: u32) -> Self {
        Self::new(radius, fraction(time_left_secs, total_secs))
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    #[must_use]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.fraction * self.circumference()
    }

    #[must_use]
    pub fn dash_offset(&self) -> f64 {
        self.circumference() - self.arc_length()
    }
}

/// `time_left / total`, clamped into `[0, 1]`.
#[must_use]
pub fn fraction(time_left_secs: u32, total_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (f64::from(time_left_secs) / f64::from(total_secs)).clamp(0.0, 1.0)
}
