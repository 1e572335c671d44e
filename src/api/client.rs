// ABOUTME: HTTP client for the WAVED platform REST API
// Thin request wrappers: no retries, no caching, failures mapped to ApiError

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::types::{
    ApiMessage, ChallengeGroup, FormField, MyReview, Quiz, RecruitingChallenge, ReviewList,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::register::RegistrationState;

/// Reviews requested per page
pub const REVIEW_PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone)]
pub struct WavedApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl WavedApiClient {
    /// Create a client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` on authenticated requests
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and turn non-2xx answers into [`ApiError::Status`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            warn!("WAVED API error {}: {}", status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason,
                message: extract_message(&body),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self
            .send(self.authorized(self.client.get(self.url(path))))
            .await?;
        Self::decode(response).await
    }

    /// Challenge group details
    pub async fn get_challenge_group(&self, group_id: &str) -> Result<ChallengeGroup, ApiError> {
        self.get_json(&format!("/challengeGroups/info/{group_id}"))
            .await
    }

    /// First page of reviews for a challenge
    pub async fn get_reviews(&self, challenge_id: u64) -> Result<ReviewList, ApiError> {
        self.get_json(&reviews_path(challenge_id, 0)).await
    }

    /// Further review pages; sent without credentials
    pub async fn get_more_reviews(
        &self,
        page: u32,
        challenge_id: u64,
    ) -> Result<ReviewList, ApiError> {
        let path = reviews_path(challenge_id, page);
        debug!("GET {} (anonymous)", path);
        let request = self.client.get(self.url(&path)).header(AUTHORIZATION, "");
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Cancel participation and request a refund
    pub async fn cancel_participation(&self, my_challenge_id: u64) -> Result<ApiMessage, ApiError> {
        let path = format!("/payments/{my_challenge_id}/cancel");
        debug!("POST {}", path);
        let response = self
            .send(self.authorized(self.client.post(self.url(&path))))
            .await?;
        let body = response.text().await?;
        Ok(ApiMessage {
            message: extract_message(&body),
        })
    }

    /// Challenge groups still accepting participants
    pub async fn get_recruiting_challenges(&self) -> Result<Vec<RecruitingChallenge>, ApiError> {
        self.get_json("/challengeGroups/waiting").await
    }

    /// Reviews written by the signed-in member
    pub async fn get_my_reviews(&self) -> Result<Vec<MyReview>, ApiError> {
        self.get_json("/members/reviews").await
    }

    pub async fn delete_review(&self, review_id: u64) -> Result<(), ApiError> {
        let path = format!("/reviews/{review_id}");
        debug!("DELETE {}", path);
        self.send(self.authorized(self.client.delete(self.url(&path))))
            .await?;
        Ok(())
    }

    /// Update the member profile with the registration record
    pub async fn edit_member(&self, record: &RegistrationState) -> Result<(), ApiError> {
        debug!("PATCH /members");
        self.send(
            self.authorized(self.client.patch(self.url("/members")))
                .json(record),
        )
        .await?;
        Ok(())
    }

    /// Quiz question for TEXT verifications
    pub async fn get_quiz(&self, challenge_group_id: &str) -> Result<Quiz, ApiError> {
        self.get_json(&format!("/challengeGroups/{challenge_group_id}/quiz"))
            .await
    }

    /// Submit verification proof as multipart form data
    pub async fn post_verification(
        &self,
        challenge_group_id: &str,
        fields: Vec<FormField>,
    ) -> Result<(), ApiError> {
        let path = format!("/verifications/{challenge_group_id}");
        debug!("POST {} ({} fields)", path, fields.len());

        let form = fields.into_iter().fold(Form::new(), |form, field| match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File {
                name,
                file_name,
                bytes,
            } => form.part(name, Part::bytes(bytes).file_name(file_name)),
        });

        self.send(
            self.authorized(self.client.post(self.url(&path)))
                .multipart(form),
        )
        .await?;
        Ok(())
    }
}

fn reviews_path(challenge_id: u64, page: u32) -> String {
    format!("/challenges/{challenge_id}/reviews?page={page}&limit={REVIEW_PAGE_SIZE}")
}

/// Pull `message` out of a JSON body, falling back to the raw text
fn extract_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
