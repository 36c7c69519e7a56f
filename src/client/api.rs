use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Candidate, NewBook, RecommendRequest, SavedBook};
use crate::routes::users::AuthResponse;

/// Authenticated REST client for the backend.
///
/// Backend error messages are surfaced verbatim so form UIs can display
/// them; the duplicate-title message is mapped to its own variant because
/// callers special-case it.
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            token: None,
        }
    }

    /// Client resuming a cached session
    pub fn with_token(base_url: String, token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            token: Some(token),
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn token(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }

    /// Registers a new account and adopts the issued token
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> AppResult<AuthResponse> {
        let response = self
            .http_client
            .post(format!("{}/users", self.base_url))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = parse_response(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Logs in and adopts the issued token
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let response = self
            .http_client
            .post(format!("{}/users/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = parse_response(response).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Fetches the reading list
    pub async fn get_books(&self) -> AppResult<Vec<SavedBook>> {
        let response = self
            .http_client
            .get(format!("{}/books", self.base_url))
            .bearer_auth(self.token()?)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Adds a book; returns the updated list
    pub async fn add_book(&self, book: &NewBook) -> AppResult<Vec<SavedBook>> {
        let response = self
            .http_client
            .post(format!("{}/books", self.base_url))
            .bearer_auth(self.token()?)
            .json(book)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Deletes a book by id; returns the updated list
    pub async fn delete_book(&self, book_id: Uuid) -> AppResult<Vec<SavedBook>> {
        let response = self
            .http_client
            .delete(format!("{}/books/{}", self.base_url, book_id))
            .bearer_auth(self.token()?)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Requests recommendations and drops candidates that cannot be
    /// rendered as a card.
    pub async fn recommend(&self, request: &RecommendRequest) -> AppResult<Vec<Candidate>> {
        let response = self
            .http_client
            .post(format!("{}/ai/recommend", self.base_url))
            .bearer_auth(self.token()?)
            .json(request)
            .send()
            .await?;

        let candidates: Vec<Candidate> = parse_response(response).await?;
        Ok(filter_renderable(candidates))
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

/// Maps a backend error response onto the local taxonomy, surfacing the
/// backend's `message` field verbatim.
fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::BAD_REQUEST if message.contains("already") => AppError::Duplicate(message),
        StatusCode::BAD_REQUEST => AppError::InvalidInput(message),
        _ => AppError::Internal(message),
    }
}

/// Drops candidates missing a title or author; everything else renders.
pub fn filter_renderable(candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| !c.title.is_empty() && !c.author.is_empty())
        .collect()
}
