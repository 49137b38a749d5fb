use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::review::ensure_required,
    errors::AppError,
    models::{InsertOutcome, NewReview, redis::RedisKey},
    state::RedisClient,
};

pub async fn add_review(
    new_review: NewReview,
    redis: &RedisClient,
) -> Result<InsertOutcome, AppError> {
    ensure_required(&new_review.user, &new_review.review)?;

    let mut conn = redis.get().await?;

    let review = new_review.into_review(Uuid::new_v4(), Utc::now());
    let json =
        serde_json::to_string(&review).map_err(|e| AppError::Serialization(e.to_string()))?;

    // Document and movie index are written together
    let _: () = redis::pipe()
        .atomic()
        .cmd("SET")
        .arg(RedisKey::review(review.id))
        .arg(&json)
        .ignore()
        .cmd("ZADD")
        .arg(RedisKey::movie_reviews(review.movie_id))
        .arg(review.created_at.timestamp_millis())
        .arg(review.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::debug!(
        "Stored review {} for movie {}",
        review.id,
        review.movie_id
    );

    Ok(InsertOutcome {
        inserted_id: review.id,
    })
}
