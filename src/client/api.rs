use reqwest::{Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    client::draft::ReviewDraft,
    errors::ErrorBody,
    models::{Review, StatusResponse},
};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            ClientError::Invalid(_) => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewBody<'a> {
    movie_id: i64,
    user: &'a str,
    review: &'a str,
    rating: u8,
}

impl<'a> ReviewBody<'a> {
    fn new(movie_id: i64, draft: &'a ReviewDraft) -> Self {
        Self {
            movie_id,
            user: &draft.user,
            review: &draft.review,
            rating: draft.rating,
        }
    }
}

/// JSON client for the `/reviews` endpoints.
#[derive(Debug, Clone)]
pub struct ReviewApi {
    http: reqwest::Client,
    base_url: String,
}

impl ReviewApi {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/reviews/{}", self.base_url, path)
    }

    pub async fn list_for_movie(&self, movie_id: i64) -> Result<Vec<Review>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("movie/{movie_id}")))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Review, ClientError> {
        let response = self.http.get(self.url(&id.to_string())).send().await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn create(&self, movie_id: i64, draft: &ReviewDraft) -> Result<Uuid, ClientError> {
        let response = self
            .http
            .post(self.url("new"))
            .json(&ReviewBody::new(movie_id, draft))
            .send()
            .await?;

        let body: StatusResponse = check(response).await?.json().await?;
        body.review_id
            .ok_or_else(|| ClientError::Invalid("Server did not return a review id".into()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        movie_id: i64,
        draft: &ReviewDraft,
    ) -> Result<StatusResponse, ClientError> {
        let response = self
            .http
            .put(self.url(&id.to_string()))
            .json(&ReviewBody::new(movie_id, draft))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<StatusResponse, ClientError> {
        let response = self.http.delete(self.url(&id.to_string())).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string(),
    };

    Err(ClientError::Status { status, message })
}
