use drill_core::model::{Author, UserId};

use super::SqliteRepository;
use super::mapping::{conn, id_to_i64, map_author_row};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn upsert_user(&self, user: &Author) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, image)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                image = excluded.image
            ",
        )
        .bind(id_to_i64("user_id", user.id.value())?)
        .bind(&user.name)
        .bind(user.image.as_deref())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<Author>, StorageError> {
        let row = sqlx::query("SELECT id, name, image FROM users WHERE id = ?1")
            .bind(id_to_i64("user_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(|row| map_author_row(row, "")).transpose()
    }
}
