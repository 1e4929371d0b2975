use chrono::{DateTime, Utc};
use drill_core::model::{Drill, NewPost, Post, PostId};
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{
    conn, id_to_i64, map_drill_row, map_post_row, map_rating_summary, post_id_from_i64, ser,
    steps_to_json, tags_to_json,
};
use crate::repository::{PostRepository, StorageError};

const POST_COLUMNS: &str = r"
    SELECT
        p.id, p.title, p.description, p.player_count, p.ball_type, p.intensity,
        p.tags, p.created_at,
        u.id AS author_id, u.name AS author_name, u.image AS author_image,
        (SELECT COUNT(*) FROM ratings r WHERE r.post_id = p.id) AS rating_count,
        (SELECT AVG(r.score) FROM ratings r WHERE r.post_id = p.id) AS rating_avg
    FROM posts p
    JOIN users u ON u.id = p.user_id
";

impl SqliteRepository {
    async fn drills_for(&self, post_id: i64) -> Result<Vec<Drill>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, duration_secs, steps
            FROM drills
            WHERE post_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_drill_row).collect()
    }

    async fn hydrate_post(&self, row: &SqliteRow) -> Result<Post, StorageError> {
        use sqlx::Row;

        let id: i64 = row.try_get("id").map_err(ser)?;
        let drills = self.drills_for(id).await?;
        let rating = map_rating_summary(row)?;
        map_post_row(row, drills, rating)
    }
}

#[async_trait::async_trait]
impl PostRepository for SqliteRepository {
    async fn insert_post(
        &self,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, StorageError> {
        let author_id = id_to_i64("user_id", post.author.value())?;
        let tags = tags_to_json(&post.tags)?;

        let mut tx = self.pool.begin().await.map_err(conn)?;

        let author_exists = sqlx::query("SELECT 1 FROM users WHERE id = ?1")
            .bind(author_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(conn)?;
        if author_exists.is_none() {
            return Err(StorageError::NotFound);
        }

        let res = sqlx::query(
            r"
            INSERT INTO posts (user_id, title, description, player_count, ball_type, intensity, tags, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(author_id)
        .bind(&post.title)
        .bind(post.description.as_deref())
        .bind(i64::from(post.player_count.minimum()))
        .bind(post.ball_type.label())
        .bind(i64::from(post.intensity.value()))
        .bind(tags)
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;
        let post_id = res.last_insert_rowid();

        for (position, drill) in post.drills.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| StorageError::Serialization("position overflow".into()))?;
            sqlx::query(
                r"
                INSERT INTO drills (post_id, position, title, description, duration_secs, steps)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(post_id)
            .bind(position)
            .bind(&drill.title)
            .bind(&drill.description)
            .bind(drill.duration_secs.map(i64::from))
            .bind(steps_to_json(&drill.steps)?)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        post_id_from_i64(post_id)
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>, StorageError> {
        let sql = format!("{POST_COLUMNS} WHERE p.id = ?1");
        let row = sqlx::query(&sql)
            .bind(id_to_i64("post_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        match row {
            Some(row) => self.hydrate_post(&row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list_posts(&self, limit: u32, offset: u32) -> Result<Vec<Post>, StorageError> {
        let sql =
            format!("{POST_COLUMNS} ORDER BY p.created_at DESC, p.id DESC LIMIT ?1 OFFSET ?2");
        let rows = sqlx::query(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            posts.push(self.hydrate_post(row).await?);
        }
        Ok(posts)
    }

    async fn delete_post(&self, id: PostId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(id_to_i64("post_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
