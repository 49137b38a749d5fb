use uuid::Uuid;

use crate::{
    db::review::parse_review,
    errors::AppError,
    models::{Review, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_review(id: Uuid, redis: &RedisClient) -> Result<Option<Review>, AppError> {
    let mut conn = redis.get().await?;

    let json: Option<String> = redis::cmd("GET")
        .arg(RedisKey::review(id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    json.as_deref().map(parse_review).transpose()
}

pub async fn get_reviews_by_movie_id(
    movie_id: i64,
    redis: &RedisClient,
) -> Result<Vec<Review>, AppError> {
    let mut conn = redis.get().await?;
    let index_key = RedisKey::movie_reviews(movie_id);

    // Highest score (newest) first
    let ids: Vec<String> = redis::cmd("ZREVRANGE")
        .arg(&index_key)
        .arg(0)
        .arg(-1)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut stale: Vec<String> = Vec::new();
    let mut keys: Vec<String> = Vec::with_capacity(ids.len());
    let mut members: Vec<String> = Vec::with_capacity(ids.len());

    for id in ids {
        match Uuid::parse_str(&id) {
            Ok(parsed) => {
                keys.push(RedisKey::review(parsed));
                members.push(id);
            }
            Err(_) => {
                tracing::warn!("Dropping malformed review id {} from movie {}", id, movie_id);
                stale.push(id);
            }
        }
    }

    let documents: Vec<Option<String>> = if keys.is_empty() {
        Vec::new()
    } else {
        redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?
    };

    let mut reviews = Vec::with_capacity(documents.len());
    for (member, document) in members.into_iter().zip(documents) {
        let Some(document) = document else {
            stale.push(member);
            continue;
        };
        match parse_review(&document) {
            Ok(review) => reviews.push(review),
            Err(e) => tracing::warn!("Skipping review for movie {}: {}", movie_id, e),
        }
    }

    if !stale.is_empty() {
        // Index members whose document is gone; a failed cleanup does not fail the read
        let removed: redis::RedisResult<u64> = redis::cmd("ZREM")
            .arg(&index_key)
            .arg(&stale)
            .query_async(&mut *conn)
            .await;
        match removed {
            Ok(n) => tracing::debug!("Removed {} stale index entries for movie {}", n, movie_id),
            Err(e) => tracing::warn!("Failed to prune index for movie {}: {}", movie_id, e),
        }
    }

    Ok(reviews)
}
