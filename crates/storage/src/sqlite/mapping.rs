use drill_core::model::{
    Author, BallType, Drill, DrillId, FocusArea, Intensity, PlayerCount, Post, PostId,
    RatingSummary, UserId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn post_id_from_i64(v: i64) -> Result<PostId, StorageError> {
    Ok(PostId::new(i64_to_u64("post_id", v)?))
}

pub(crate) fn drill_id_from_i64(v: i64) -> Result<DrillId, StorageError> {
    Ok(DrillId::new(i64_to_u64("drill_id", v)?))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

/// Tags are stored as a JSON array of labels, in selection order.
pub(crate) fn tags_to_json(tags: &[FocusArea]) -> Result<String, StorageError> {
    let labels: Vec<&str> = tags.iter().map(|t| t.label()).collect();
    serde_json::to_string(&labels).map_err(ser)
}

pub(crate) fn tags_from_json(raw: &str) -> Result<Vec<FocusArea>, StorageError> {
    let labels: Vec<String> = serde_json::from_str(raw).map_err(ser)?;
    labels
        .iter()
        .map(|label| FocusArea::from_label(label).map_err(ser))
        .collect()
}

pub(crate) fn steps_to_json(steps: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(steps).map_err(ser)
}

pub(crate) fn steps_from_json(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_author_row(row: &SqliteRow, prefix: &str) -> Result<Author, StorageError> {
    let col = |name: &str| format!("{prefix}{name}");
    Ok(Author {
        id: user_id_from_i64(row.try_get::<i64, _>(col("id").as_str()).map_err(ser)?)?,
        name: row.try_get(col("name").as_str()).map_err(ser)?,
        image: row.try_get(col("image").as_str()).map_err(ser)?,
    })
}

pub(crate) fn map_drill_row(row: &SqliteRow) -> Result<Drill, StorageError> {
    let duration_secs = row
        .try_get::<Option<i64>, _>("duration_secs")
        .map_err(ser)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| StorageError::Serialization(format!("invalid duration_secs: {v}")))
        })
        .transpose()?;
    let steps: String = row.try_get("steps").map_err(ser)?;

    Ok(Drill::new(
        drill_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        duration_secs,
        steps_from_json(&steps)?,
    ))
}

/// Maps a `posts JOIN users` row. Drills and rating come from separate
/// queries.
pub(crate) fn map_post_row(
    row: &SqliteRow,
    drills: Vec<Drill>,
    rating: RatingSummary,
) -> Result<Post, StorageError> {
    let player_count_raw: i64 = row.try_get("player_count").map_err(ser)?;
    let player_count = u8::try_from(player_count_raw)
        .ok()
        .and_then(PlayerCount::from_minimum)
        .ok_or_else(|| {
            StorageError::Serialization(format!("invalid player_count: {player_count_raw}"))
        })?;

    let ball_raw: String = row.try_get("ball_type").map_err(ser)?;
    let ball_type = BallType::from_label(&ball_raw).map_err(ser)?;

    let intensity_raw: i64 = row.try_get("intensity").map_err(ser)?;
    let intensity = u8::try_from(intensity_raw)
        .map_err(ser)
        .and_then(|v| Intensity::new(v).map_err(ser))?;

    let tags: String = row.try_get("tags").map_err(ser)?;

    Ok(Post::from_persisted(
        post_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<Option<String>, _>("description").map_err(ser)?,
        map_author_row(row, "author_")?,
        player_count,
        ball_type,
        intensity,
        tags_from_json(&tags)?,
        drills,
        rating,
        row.try_get("created_at").map_err(ser)?,
    ))
}

pub(crate) fn map_rating_summary(row: &SqliteRow) -> Result<RatingSummary, StorageError> {
    let count: i64 = row.try_get("rating_count").map_err(ser)?;
    let average: Option<f64> = row.try_get("rating_avg").map_err(ser)?;
    let count = u32::try_from(count).map_err(ser)?;
    Ok(RatingSummary::new(average.unwrap_or(0.0), count))
}
