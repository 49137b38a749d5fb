use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const USER_LENGTH: RangeInclusive<usize> = 2..=50;
pub const REVIEW_LENGTH: RangeInclusive<usize> = 10..=500;
pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// Rating stored for reviews that never received a star value.
pub const UNRATED: u8 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub movie_id: i64,
    pub user: String,
    pub review: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_rated(&self) -> bool {
        self.rating != UNRATED
    }

    pub fn apply(&mut self, update: &ReviewUpdate, now: DateTime<Utc>) {
        self.user = update.user.clone();
        self.review = update.review.clone();
        self.rating = update.rating;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub movie_id: i64,
    pub user: String,
    pub review: String,
    pub rating: u8,
}

impl NewReview {
    /// A review without a star rating, as the store accepts it.
    pub fn unrated(movie_id: i64, user: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            movie_id,
            user: user.into(),
            review: review.into(),
            rating: UNRATED,
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    pub fn into_review(self, id: Uuid, now: DateTime<Utc>) -> Review {
        Review {
            id,
            movie_id: self.movie_id,
            user: self.user,
            review: self.review,
            rating: self.rating,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields a PUT may overwrite. `movie_id` and `created_at` are never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub user: String,
    pub review: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

pub fn check_user(user: &str) -> Result<(), String> {
    if USER_LENGTH.contains(&user.chars().count()) {
        Ok(())
    } else {
        Err(format!(
            "User name must be between {} and {} characters",
            USER_LENGTH.start(),
            USER_LENGTH.end()
        ))
    }
}

pub fn check_review(review: &str) -> Result<(), String> {
    if REVIEW_LENGTH.contains(&review.chars().count()) {
        Ok(())
    } else {
        Err(format!(
            "Review must be between {} and {} characters",
            REVIEW_LENGTH.start(),
            REVIEW_LENGTH.end()
        ))
    }
}

pub fn check_rating(rating: i64) -> Result<u8, String> {
    if RATING_RANGE.contains(&rating) {
        Ok(rating as u8)
    } else {
        Err(format!(
            "Rating must be between {} and {}",
            RATING_RANGE.start(),
            RATING_RANGE.end()
        ))
    }
}

/// Success body of the mutating endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<Uuid>,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
            review_id: None,
        }
    }

    pub fn created(review_id: Uuid) -> Self {
        Self {
            review_id: Some(review_id),
            ..Self::success("Review created successfully")
        }
    }
}
