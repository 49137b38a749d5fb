use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::review::{ensure_required, parse_review},
    errors::AppError,
    models::{ReviewUpdate, UpdateOutcome, redis::RedisKey},
    state::RedisClient,
};

pub async fn update_review(
    id: Uuid,
    update: ReviewUpdate,
    redis: &RedisClient,
) -> Result<UpdateOutcome, AppError> {
    ensure_required(&update.user, &update.review)?;

    let mut conn = redis.get().await?;
    let key = RedisKey::review(id);

    let json: Option<String> = redis::cmd("GET")
        .arg(&key)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let Some(json) = json else {
        return Ok(UpdateOutcome::default());
    };

    let mut review = parse_review(&json)?;
    review.apply(&update, Utc::now());

    let updated =
        serde_json::to_string(&review).map_err(|e| AppError::Serialization(e.to_string()))?;

    // XX: a review deleted since the read must not come back
    let written: Option<String> = redis::cmd("SET")
        .arg(&key)
        .arg(&updated)
        .arg("XX")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if written.is_none() {
        return Ok(UpdateOutcome::default());
    }

    tracing::debug!("Updated review {}", id);
    Ok(UpdateOutcome {
        matched_count: 1,
        modified_count: 1,
    })
}
