//! Data-access layer for review documents.
//!
//! Every operation returns a `Result`; storage faults are logged here and
//! surface to callers as an [`AppError`], never as a panic.

pub mod delete;
pub mod get;
pub mod memory;
pub mod post;
pub mod put;

use async_trait::async_trait;
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{DeleteOutcome, InsertOutcome, NewReview, Review, ReviewUpdate, UpdateOutcome},
    state::RedisClient,
};

pub use memory::MemoryReviewStore;

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn add_review(&self, review: NewReview) -> Result<InsertOutcome, AppError>;

    /// `Ok(None)` when no document has this id.
    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError>;

    async fn update_review(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<UpdateOutcome, AppError>;

    async fn delete_review(&self, id: Uuid) -> Result<DeleteOutcome, AppError>;

    /// Newest `created_at` first. Empty when the movie has no reviews.
    async fn get_reviews_by_movie_id(&self, movie_id: i64) -> Result<Vec<Review>, AppError>;

    async fn close(&self) {}
}

pub(crate) fn ensure_required(user: &str, review: &str) -> Result<(), AppError> {
    if user.is_empty() || review.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }
    Ok(())
}

pub(crate) fn parse_review(json: &str) -> Result<Review, AppError> {
    serde_json::from_str(json)
        .map_err(|e| AppError::Deserialization(format!("Corrupt review document: {}", e)))
}

fn log_failure(action: &str, err: AppError) -> AppError {
    if err.is_server_fault() {
        tracing::error!("Unable to {}: {}", action, err);
    } else {
        tracing::warn!("Rejected {}: {}", action, err);
    }
    err
}

pub struct RedisReviewStore {
    pool: RwLock<Option<RedisClient>>,
}

impl RedisReviewStore {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let manager = RedisConnectionManager::new(redis_url)?;
        let pool = Pool::builder().build(manager).await?;

        {
            let mut conn = pool.get().await?;
            let _: String = redis::cmd("PING")
                .query_async(&mut *conn)
                .await
                .map_err(AppError::RedisCommandError)?;
        }

        tracing::info!("Connected to Redis review store");
        Ok(Self {
            pool: RwLock::new(Some(pool)),
        })
    }

    async fn pool(&self) -> Result<RedisClient, AppError> {
        self.pool
            .read()
            .await
            .clone()
            .ok_or_else(|| AppError::RedisPoolError("Review store is closed".into()))
    }
}

#[async_trait]
impl ReviewStore for RedisReviewStore {
    async fn add_review(&self, review: NewReview) -> Result<InsertOutcome, AppError> {
        let redis = self.pool().await?;
        post::add_review(review, &redis)
            .await
            .map_err(|e| log_failure("post review", e))
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let redis = self.pool().await?;
        get::get_review(id, &redis)
            .await
            .map_err(|e| log_failure("get review", e))
    }

    async fn update_review(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<UpdateOutcome, AppError> {
        let redis = self.pool().await?;
        put::update_review(id, update, &redis)
            .await
            .map_err(|e| log_failure("update review", e))
    }

    async fn delete_review(&self, id: Uuid) -> Result<DeleteOutcome, AppError> {
        let redis = self.pool().await?;
        delete::delete_review(id, &redis)
            .await
            .map_err(|e| log_failure("delete review", e))
    }

    async fn get_reviews_by_movie_id(&self, movie_id: i64) -> Result<Vec<Review>, AppError> {
        let redis = self.pool().await?;
        get::get_reviews_by_movie_id(movie_id, &redis)
            .await
            .map_err(|e| log_failure("get reviews", e))
    }

    async fn close(&self) {
        // Connections are released once in-flight requests drop their pool clones
        if self.pool.write().await.take().is_some() {
            tracing::info!("Closed Redis review store");
        }
    }
}
