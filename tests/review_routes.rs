use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{
        Method, Request, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN},
    },
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use movie_reviews::{config::Config, create_app, db::MemoryReviewStore, state::AppState};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> (Router, Arc<MemoryReviewStore>) {
    let store = Arc::new(MemoryReviewStore::new());
    let app = create_app(AppState::new(store.clone()), &Config::default());
    (app, store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: Value) -> String {
    let (status, json) = send(app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json["reviewId"].as_str().unwrap().to_string()
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let (app, _) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn created_review_is_listed_for_its_movie() {
    let (app, _) = test_app();

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/v1/reviews/new",
        Some(json!({"movieId": 550, "user": "Alice", "review": "Great cinematography!", "rating": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Review created successfully");
    let review_id = json["reviewId"].as_str().unwrap().to_string();

    let (status, list) = send(&app, Method::GET, "/api/v1/reviews/movie/550", None).await;
    assert_eq!(status, StatusCode::OK);

    let reviews = list.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    let review = &reviews[0];
    assert_eq!(review["id"], review_id.as_str());
    assert_eq!(review["movieId"], 550);
    assert_eq!(review["user"], "Alice");
    assert_eq!(review["review"], "Great cinematography!");
    assert_eq!(review["rating"], 5);

    let age = Utc::now() - timestamp(&review["createdAt"]);
    assert!(age < chrono::Duration::seconds(5));
    assert_eq!(review["createdAt"], review["updatedAt"]);
}

#[tokio::test]
async fn create_trims_and_accepts_numeric_strings() {
    let (app, _) = test_app();

    let id = create(
        &app,
        json!({"movieId": "42", "user": "  Bob  ", "review": "   Surprisingly good.   ", "rating": "4"}),
    )
    .await;

    let (status, review) = send(&app, Method::GET, &format!("/api/v1/reviews/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["movieId"], 42);
    assert_eq!(review["user"], "Bob");
    assert_eq!(review["review"], "Surprisingly good.");
    assert_eq!(review["rating"], 4);
}

#[tokio::test]
async fn create_rejects_out_of_range_text() {
    let (app, store) = test_app();

    let cases = [
        json!({"movieId": 1, "user": "A", "review": "Long enough review", "rating": 3}),
        json!({"movieId": 1, "user": "x".repeat(51), "review": "Long enough review", "rating": 3}),
        json!({"movieId": 1, "user": "   A   ", "review": "Long enough review", "rating": 3}),
        json!({"movieId": 1, "user": "Alice", "review": "Too short", "rating": 3}),
        json!({"movieId": 1, "user": "Alice", "review": "y".repeat(501), "rating": 3}),
        json!({"movieId": 1, "user": 12, "review": "Long enough review", "rating": 3}),
        json!({"movieId": 1, "review": "Long enough review", "rating": 3}),
        json!({"movieId": 1, "user": "Alice", "rating": 3}),
    ];

    for body in cases {
        let (status, json) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {body}");
        assert!(json["error"].is_string());
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_accepts_boundary_lengths() {
    let (app, store) = test_app();

    create(
        &app,
        json!({"movieId": 1, "user": "Al", "review": "z".repeat(10), "rating": 1}),
    )
    .await;
    create(
        &app,
        json!({"movieId": 1, "user": "u".repeat(50), "review": "z".repeat(500), "rating": 5}),
    )
    .await;

    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn create_requires_rating_in_range() {
    let (app, store) = test_app();

    for rating in [json!(null), json!(0), json!(6), json!(-1), json!("abc"), json!(true)] {
        let body = json!({"movieId": 7, "user": "Alice", "review": "Long enough review", "rating": rating});
        let (status, json) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted rating {rating}");
        assert!(json["error"].as_str().unwrap().contains("Rating"));
    }

    let body = json!({"movieId": 7, "user": "Alice", "review": "Long enough review"});
    let (status, json) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Rating must be between 1 and 5");

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn create_requires_valid_movie_id() {
    let (app, _) = test_app();

    let body = json!({"user": "Alice", "review": "Long enough review", "rating": 3});
    let (status, json) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Movie ID is required");

    let body = json!({"movieId": "abc", "user": "Alice", "review": "Long enough review", "rating": 3});
    let (status, json) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Movie ID must be a valid number");

    let body = json!({"movieId": -3, "user": "Alice", "review": "Long enough review", "rating": 3});
    let (status, _) = send(&app, Method::POST, "/api/v1/reviews/new", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/reviews/new")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn get_review_distinguishes_missing_and_malformed_ids() {
    let (app, _) = test_app();

    let missing = uuid::Uuid::new_v4();
    let (status, json) = send(&app, Method::GET, &format!("/api/v1/reviews/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Review not found");

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Review ID is required");
}

#[tokio::test]
async fn update_changes_text_fields_only() {
    let (app, _) = test_app();
    let id = create(
        &app,
        json!({"movieId": 550, "user": "Alice", "review": "Great cinematography!", "rating": 5}),
    )
    .await;
    let uri = format!("/api/v1/reviews/{id}");
    let (_, before) = send(&app, Method::GET, &uri, None).await;

    tokio::time::sleep(Duration::from_millis(5)).await;

    let (status, json) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"movieId": 999, "user": "Alice B.", "review": "Second viewing was even better.", "rating": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Review updated successfully");

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["movieId"], 550);
    assert_eq!(after["createdAt"], before["createdAt"]);
    assert_eq!(after["user"], "Alice B.");
    assert_eq!(after["review"], "Second viewing was even better.");
    assert_eq!(after["rating"], 4);
    assert!(timestamp(&after["updatedAt"]) > timestamp(&before["updatedAt"]));
}

#[tokio::test]
async fn update_validates_and_reports_missing_reviews() {
    let (app, _) = test_app();
    let id = create(
        &app,
        json!({"movieId": 1, "user": "Alice", "review": "Long enough review", "rating": 2}),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/reviews/{id}"),
        Some(json!({"user": "Alice", "review": "short", "rating": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/reviews/{id}"),
        Some(json!({"user": "Alice", "review": "Long enough review"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let (status, json) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/reviews/{missing}"),
        Some(json!({"user": "Alice", "review": "Long enough review", "rating": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Review not found or no changes made");

    let (status, json) = send(
        &app,
        Method::PUT,
        "/api/v1/reviews/bogus",
        Some(json!({"user": "Alice", "review": "Long enough review", "rating": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid review ID");
}

#[tokio::test]
async fn delete_removes_review() {
    let (app, store) = test_app();
    let id = create(
        &app,
        json!({"movieId": 3, "user": "Alice", "review": "Long enough review", "rating": 3}),
    )
    .await;
    let uri = format!("/api/v1/reviews/{id}");

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Review deleted successfully");
    assert!(store.is_empty().await);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Review not found");
}

#[tokio::test]
async fn delete_with_undecodable_id_is_a_server_fault() {
    let (app, store) = test_app();
    create(
        &app,
        json!({"movieId": 3, "user": "Alice", "review": "Long enough review", "rating": 3}),
    )
    .await;

    let (status, json) = send(&app, Method::DELETE, "/api/v1/reviews/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");

    let (status, json) = send(&app, Method::DELETE, "/api/v1/reviews/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Review ID is required");

    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn movie_without_reviews_lists_empty() {
    let (app, _) = test_app();

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/movie/12345", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn movie_list_is_newest_first_and_scoped() {
    let (app, _) = test_app();

    let first = create(
        &app,
        json!({"movieId": 10, "user": "First", "review": "The first review here", "rating": 3}),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = create(
        &app,
        json!({"movieId": 10, "user": "Second", "review": "The second review here", "rating": 4}),
    )
    .await;
    create(
        &app,
        json!({"movieId": 11, "user": "Other", "review": "A different movie entirely", "rating": 1}),
    )
    .await;

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/movie/10", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[tokio::test]
async fn movie_list_rejects_non_numeric_id() {
    let (app, _) = test_app();

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/movie/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Movie ID must be a valid number");
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let (app, _) = test_app();

    let (status, json) = send(&app, Method::GET, "/api/v2/anything", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn wrong_method_returns_json_error() {
    let (app, _) = test_app();

    let (status, json) = send(&app, Method::GET, "/api/v1/reviews/new", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");

    let uri = format!("/api/v1/reviews/{}", uuid::Uuid::new_v4());
    let (status, json) = send(&app, Method::PATCH, &uri, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn wildcard_origin_allows_any_origin() {
    let config = Config {
        allowed_origins: vec!["*".into()],
        ..Config::default()
    };
    let app = create_app(AppState::new(Arc::new(MemoryReviewStore::new())), &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(ORIGIN, "https://anywhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
