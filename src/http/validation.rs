//! Payload parsing and field rules for the review endpoints.
//!
//! Numeric fields are accepted either as JSON numbers or as strings and are
//! read with leading-integer semantics, so `"550"`, `550`, `550.9` and
//! `"550abc"` all yield 550.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{
        NewReview, ReviewUpdate,
        review::{check_rating, check_review, check_user},
    },
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub movie_id: Option<Value>,
    pub user: Option<Value>,
    pub review: Option<Value>,
    pub rating: Option<Value>,
}

impl ReviewPayload {
    pub fn validate_new(&self) -> Result<NewReview, AppError> {
        let movie_id = self
            .movie_id
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("Movie ID is required".into()))?;

        let update = self.validate_update()?;
        let movie_id = parse_movie_id(movie_id)?;

        Ok(NewReview::unrated(movie_id, update.user, update.review).with_rating(update.rating))
    }

    /// Same rules as creation, without the movie id.
    pub fn validate_update(&self) -> Result<ReviewUpdate, AppError> {
        let user = required_string(&self.user)
            .ok_or_else(|| {
                AppError::BadRequest("User name is required and must be a string".into())
            })?
            .trim();

        let review = required_string(&self.review)
            .ok_or_else(|| {
                AppError::BadRequest("Review text is required and must be a string".into())
            })?
            .trim();

        check_user(user).map_err(AppError::BadRequest)?;
        check_review(review).map_err(AppError::BadRequest)?;

        // A missing rating counts as 0 and is rejected like any other out-of-range value
        let rating = match &self.rating {
            Some(value) => parse_int(value),
            None => Some(0),
        };
        let rating = rating
            .ok_or_else(|| AppError::BadRequest("Rating must be a valid number".into()))
            .and_then(|r| check_rating(r).map_err(AppError::BadRequest))?;

        Ok(ReviewUpdate {
            user: user.to_string(),
            review: review.to_string(),
            rating,
        })
    }
}

fn required_string(value: &Option<Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Reads a leading integer out of a string: optional whitespace, optional sign, digits.
pub fn parse_int_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_str(s),
        _ => None,
    }
}

pub fn parse_movie_id(value: &Value) -> Result<i64, AppError> {
    let movie_id = parse_int(value)
        .ok_or_else(|| AppError::BadRequest("Movie ID must be a valid number".into()))?;
    ensure_non_negative(movie_id)
}

pub fn parse_movie_id_str(raw: &str) -> Result<i64, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("Movie ID is required".into()));
    }
    let movie_id = parse_int_str(raw)
        .ok_or_else(|| AppError::BadRequest("Movie ID must be a valid number".into()))?;
    ensure_non_negative(movie_id)
}

fn ensure_non_negative(movie_id: i64) -> Result<i64, AppError> {
    if movie_id < 0 {
        return Err(AppError::BadRequest(
            "Movie ID must be a non-negative number".into(),
        ));
    }
    Ok(movie_id)
}

/// A blank id is a bad request. An id that is present but not a UUID is
/// reported as a storage fault, the same class as any other identifier the
/// store cannot decode.
pub fn parse_review_id(raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("Review ID is required".into()));
    }
    Uuid::parse_str(raw)
        .map_err(|e| AppError::Deserialization(format!("Invalid review ID '{}': {}", raw, e)))
}
