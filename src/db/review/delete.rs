use uuid::Uuid;

use crate::{
    db::review::parse_review,
    errors::AppError,
    models::{DeleteOutcome, redis::RedisKey},
    state::RedisClient,
};

pub async fn delete_review(id: Uuid, redis: &RedisClient) -> Result<DeleteOutcome, AppError> {
    let mut conn = redis.get().await?;
    let key = RedisKey::review(id);

    let json: Option<String> = redis::cmd("GET")
        .arg(&key)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let Some(json) = json else {
        tracing::debug!("No review {} to delete", id);
        return Ok(DeleteOutcome::default());
    };

    let review = parse_review(&json)?;

    let (deleted,): (u64,) = redis::pipe()
        .atomic()
        .cmd("DEL")
        .arg(&key)
        .cmd("ZREM")
        .arg(RedisKey::movie_reviews(review.movie_id))
        .arg(id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if deleted > 0 {
        tracing::debug!("Deleted review {} for movie {}", id, review.movie_id);
    }

    Ok(DeleteOutcome {
        deleted_count: deleted,
    })
}
