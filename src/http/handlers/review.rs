use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    errors::{AppError, ErrorBody},
    http::validation::{ReviewPayload, parse_movie_id_str, parse_review_id},
    models::{Review, StatusResponse},
    state::AppState,
};

type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn rejected(err: AppError) -> ErrorResponse {
    tracing::warn!("Rejected review request: {}", err);
    err.to_response()
}

fn failed(context: &str, err: AppError) -> ErrorResponse {
    if err.is_server_fault() {
        tracing::error!("{}: {}", context, err);
    } else {
        tracing::warn!("{}: {}", context, err);
    }
    err.to_response()
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ErrorResponse> {
    let Json(payload) = payload.map_err(|e| rejected(e.into()))?;
    let new_review = payload.validate_new().map_err(rejected)?;

    tracing::info!(
        "Creating review for movie {} by {} ({} stars)",
        new_review.movie_id,
        new_review.user,
        new_review.rating
    );

    let outcome = state
        .reviews
        .add_review(new_review)
        .await
        .map_err(|e| failed("Error creating review", e))?;

    tracing::info!("Review created with ID: {}", outcome.inserted_id);
    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::created(outcome.inserted_id)),
    ))
}

pub async fn get_review_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Review>, ErrorResponse> {
    let review_id = parse_review_id(&id).map_err(|e| failed("Error retrieving review", e))?;

    let review = state
        .reviews
        .get_review(review_id)
        .await
        .map_err(|e| failed("Error retrieving review", e))?
        .ok_or_else(|| AppError::NotFound("Review not found".into()).to_response())?;

    Ok(Json(review))
}

pub async fn update_review_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<ReviewPayload>, JsonRejection>,
) -> Result<Json<StatusResponse>, ErrorResponse> {
    // Unlike reads and deletes, an update reports an undecodable id as bad input
    let review_id = parse_review_id(&id)
        .map_err(|e| match e {
            AppError::Deserialization(_) => AppError::BadRequest("Invalid review ID".into()),
            other => other,
        })
        .map_err(rejected)?;
    let Json(payload) = payload.map_err(|e| rejected(e.into()))?;
    let update = payload.validate_update().map_err(rejected)?;

    tracing::info!("Updating review {}", review_id);

    let outcome = state
        .reviews
        .update_review(review_id, update)
        .await
        .map_err(|e| failed("Error updating review", e))?;

    if outcome.matched_count == 0 {
        return Err(
            AppError::NotFound("Review not found or no changes made".into()).to_response(),
        );
    }

    Ok(Json(StatusResponse::success("Review updated successfully")))
}

pub async fn delete_review_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ErrorResponse> {
    let review_id = parse_review_id(&id).map_err(|e| failed("Error deleting review", e))?;

    tracing::info!("Deleting review {}", review_id);

    let outcome = state
        .reviews
        .delete_review(review_id)
        .await
        .map_err(|e| failed("Error deleting review", e))?;

    if outcome.deleted_count == 0 {
        return Err(AppError::NotFound("Review not found".into()).to_response());
    }

    Ok(Json(StatusResponse::success("Review deleted successfully")))
}

pub async fn get_movie_reviews_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Review>>, ErrorResponse> {
    let movie_id = parse_movie_id_str(&id).map_err(rejected)?;

    let reviews = state
        .reviews
        .get_reviews_by_movie_id(movie_id)
        .await
        .map_err(|e| failed("Error retrieving reviews", e))?;

    tracing::info!("Retrieved {} reviews for movie {}", reviews.len(), movie_id);
    Ok(Json(reviews))
}
