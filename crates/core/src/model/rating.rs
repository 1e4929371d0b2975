use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{PostId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating score must be between 1 and 5, got {0}")]
    InvalidScore(u8),
}

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Star score given to a session, 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatingScore(u8);

impl RatingScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `RatingError::InvalidScore` outside 1..=5.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::InvalidScore(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

//
// ─── RATING ────────────────────────────────────────────────────────────────────
//

/// One user's rating of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    pub post_id: PostId,
    pub user_id: UserId,
    pub score: RatingScore,
    pub rated_at: DateTime<Utc>,
}

/// Aggregate shown next to a post ("⭐ 4.5 (12)").
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    average: f64,
    count: u32,
}

impl RatingSummary {
    #[must_use]
    pub fn new(average: f64, count: u32) -> Self {
        if count == 0 || !average.is_finite() {
            return Self::default();
        }
        Self { average, count }
    }

    /// Summarise a set of scores.
    #[must_use]
    pub fn from_scores(scores: &[RatingScore]) -> Self {
        let count = u32::try_from(scores.len()).unwrap_or(u32::MAX);
        if count == 0 {
            return Self::default();
        }
        let total: u64 = scores.iter().map(|s| u64::from(s.value())).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = total as f64 / f64::from(count);
        Self { average, count }
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Average rounded to one decimal place for display.
    #[must_use]
    pub fn display_average(&self) -> f64 {
        (self.average * 10.0).round() / 10.0
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[u8]) -> Vec<RatingScore> {
        values.iter().map(|v| RatingScore::new(*v).unwrap()).collect()
    }

    #[test]
    fn score_bounds() {
        assert!(RatingScore::new(0).is_err());
        assert!(RatingScore::new(6).is_err());
        assert_eq!(RatingScore::new(5).unwrap().value(), 5);
    }

    #[test]
    fn summary_from_scores() {
        let summary = RatingSummary::from_scores(&scores(&[5, 4, 4]));
        assert_eq!(summary.count(), 3);
        assert!((summary.display_average() - 4.3).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = RatingSummary::from_scores(&[]);
        assert_eq!(summary, RatingSummary::default());
        assert_eq!(RatingSummary::new(3.0, 0), RatingSummary::default());
    }
}
