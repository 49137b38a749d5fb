use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::review::{ReviewStore, ensure_required},
    errors::AppError,
    models::{DeleteOutcome, InsertOutcome, NewReview, Review, ReviewUpdate, UpdateOutcome},
};

/// Process-local review store used by tests and `REVIEW_STORE=memory`.
#[derive(Default)]
pub struct MemoryReviewStore {
    reviews: Mutex<HashMap<Uuid, Review>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reviews.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.lock().await.is_empty()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn add_review(&self, new_review: NewReview) -> Result<InsertOutcome, AppError> {
        ensure_required(&new_review.user, &new_review.review)?;

        let review = new_review.into_review(Uuid::new_v4(), Utc::now());
        let inserted_id = review.id;
        self.reviews.lock().await.insert(inserted_id, review);

        Ok(InsertOutcome { inserted_id })
    }

    async fn get_review(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        Ok(self.reviews.lock().await.get(&id).cloned())
    }

    async fn update_review(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<UpdateOutcome, AppError> {
        ensure_required(&update.user, &update.review)?;

        let mut reviews = self.reviews.lock().await;
        match reviews.get_mut(&id) {
            Some(review) => {
                review.apply(&update, Utc::now());
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: 1,
                })
            }
            None => Ok(UpdateOutcome::default()),
        }
    }

    async fn delete_review(&self, id: Uuid) -> Result<DeleteOutcome, AppError> {
        let removed = self.reviews.lock().await.remove(&id);
        Ok(DeleteOutcome {
            deleted_count: removed.map_or(0, |_| 1),
        })
    }

    async fn get_reviews_by_movie_id(&self, movie_id: i64) -> Result<Vec<Review>, AppError> {
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .await
            .values()
            .filter(|review| review.movie_id == movie_id)
            .cloned()
            .collect();

        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }
}
