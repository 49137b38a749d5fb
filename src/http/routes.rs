use axum::{Json, Router, http::StatusCode, routing::get, routing::post};

use crate::{
    errors::ErrorBody,
    http::handlers::{
        create_review_handler, delete_review_handler, get_movie_reviews_handler,
        get_review_handler, update_review_handler,
    },
    state::AppState,
};

pub const API_PREFIX: &str = "/api/v1";

pub fn create_http_routes(state: AppState) -> Router {
    let reviews = Router::new()
        .route("/reviews/new", post(create_review_handler))
        .route("/reviews/movie/{id}", get(get_movie_reviews_handler))
        .route(
            "/reviews/{id}",
            get(get_review_handler)
                .put(update_review_handler)
                .delete(delete_review_handler),
        )
        .method_not_allowed_fallback(method_not_allowed);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest(API_PREFIX, reviews)
        .with_state(state)
}

async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".into(),
        }),
    )
}
