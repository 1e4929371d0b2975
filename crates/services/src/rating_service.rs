use std::sync::Arc;

use drill_core::model::{PostId, Rating, RatingScore, RatingSummary, UserId};
use storage::repository::{RatingRepository, StorageError};

use crate::error::RatingServiceError;
use crate::Clock;

/// Records star ratings and reports the recomputed summary.
#[derive(Clone)]
pub struct RatingService {
    clock: Clock,
    ratings: Arc<dyn RatingRepository>,
}

impl RatingService {
    #[must_use]
    pub fn new(clock: Clock, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { clock, ratings }
    }

    /// Rate a session from 1 to 5. Rating again replaces the user's earlier
    /// score.
    ///
    /// # Errors
    ///
    /// Returns `RatingServiceError::Rating` for scores outside 1..=5,
    /// `RatingServiceError::NotFound` if the session does not exist, and
    /// `RatingServiceError::Storage` for other repository failures.
    pub async fn rate(
        &self,
        post_id: PostId,
        user_id: UserId,
        score: u8,
    ) -> Result<RatingSummary, RatingServiceError> {
        let rating = Rating {
            post_id,
            user_id,
            score: RatingScore::new(score)?,
            rated_at: self.clock.now(),
        };
        match self.ratings.upsert_rating(&rating).await {
            Ok(()) => {}
            Err(StorageError::NotFound) => return Err(RatingServiceError::NotFound(post_id)),
            Err(err) => return Err(err.into()),
        }
        let summary = self.ratings.rating_summary(post_id).await?;
        tracing::debug!(
            post_id = %post_id,
            score,
            average = summary.average(),
            count = summary.count(),
            "rating stored"
        );
        Ok(summary)
    }

    /// # Errors
    ///
    /// Returns `RatingServiceError::Storage` if repository access fails.
    pub async fn summary(&self, post_id: PostId) -> Result<RatingSummary, RatingServiceError> {
        Ok(self.ratings.rating_summary(post_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Author, NewDrill, NewPost, RatingError};
    use drill_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, PostRepository, UserRepository};

    async fn seeded() -> (RatingService, PostId) {
        let repo = InMemoryRepository::new();
        for id in [1, 2] {
            repo.upsert_user(&Author {
                id: UserId::new(id),
                name: format!("Player {id}"),
                image: None,
            })
            .await
            .unwrap();
        }
        let post_id = repo
            .insert_post(
                &NewPost {
                    author: UserId::new(1),
                    title: "Boast drill".into(),
                    description: None,
                    player_count: Default::default(),
                    ball_type: Default::default(),
                    intensity: Default::default(),
                    tags: Vec::new(),
                    drills: vec![NewDrill {
                        title: "Boasts".into(),
                        description: "Two wall boasts".into(),
                        duration_secs: None,
                        steps: Vec::new(),
                    }],
                },
                fixed_now(),
            )
            .await
            .unwrap();
        (
            RatingService::new(Clock::fixed(fixed_now()), Arc::new(repo)),
            post_id,
        )
    }

    #[tokio::test]
    async fn rating_updates_summary_and_replaces_earlier_score() {
        let (service, post_id) = seeded().await;

        let summary = service.rate(post_id, UserId::new(1), 5).await.unwrap();
        assert_eq!(summary.count(), 1);

        let summary = service.rate(post_id, UserId::new(2), 4).await.unwrap();
        assert_eq!(summary.count(), 2);
        assert!((summary.average() - 4.5).abs() < f64::EPSILON);

        let summary = service.rate(post_id, UserId::new(2), 2).await.unwrap();
        assert_eq!(summary.count(), 2);
        assert!((summary.display_average() - 3.5).abs() < f64::EPSILON);
        assert_eq!(service.summary(post_id).await.unwrap(), summary);
    }

    #[tokio::test]
    async fn rejects_bad_score_and_missing_post() {
        let (service, post_id) = seeded().await;

        assert!(matches!(
            service.rate(post_id, UserId::new(1), 6).await,
            Err(RatingServiceError::Rating(RatingError::InvalidScore(6)))
        ));
        let missing = PostId::new(999);
        assert!(matches!(
            service.rate(missing, UserId::new(1), 3).await,
            Err(RatingServiceError::NotFound(id)) if id == missing
        ));
    }
}
