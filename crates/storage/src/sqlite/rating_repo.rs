use drill_core::model::{PostId, Rating, RatingSummary};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_rating_summary, ser};
use crate::repository::{RatingRepository, StorageError};

#[async_trait::async_trait]
impl RatingRepository for SqliteRepository {
    async fn upsert_rating(&self, rating: &Rating) -> Result<(), StorageError> {
        let post_id = id_to_i64("post_id", rating.post_id.value())?;
        let user_id = id_to_i64("user_id", rating.user_id.value())?;

        let known = sqlx::query(
            r"
            SELECT
                EXISTS (SELECT 1 FROM posts WHERE id = ?1)
                AND EXISTS (SELECT 1 FROM users WHERE id = ?2) AS known
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;
        let known: i64 = sqlx::Row::try_get(&known, "known").map_err(ser)?;
        if known == 0 {
            return Err(StorageError::NotFound);
        }

        sqlx::query(
            r"
            INSERT INTO ratings (post_id, user_id, score, rated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(post_id, user_id) DO UPDATE SET
                score = excluded.score,
                rated_at = excluded.rated_at
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(i64::from(rating.score.value()))
        .bind(rating.rated_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn rating_summary(&self, post_id: PostId) -> Result<RatingSummary, StorageError> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS rating_count, AVG(score) AS rating_avg
            FROM ratings
            WHERE post_id = ?1
            ",
        )
        .bind(id_to_i64("post_id", post_id.value())?)
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;

        map_rating_summary(&row)
    }
}
