// ABOUTME: Verification seam: quiz lookup and proof submission

use async_trait::async_trait;

use crate::api::client::WavedApiClient;
use crate::api::types::{FormField, Quiz};
use crate::error::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn get_quiz(&self, challenge_group_id: &str) -> Result<Quiz, ApiError>;

    async fn post_verification(
        &self,
        challenge_group_id: &str,
        fields: Vec<FormField>,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl VerificationApi for WavedApiClient {
    async fn get_quiz(&self, challenge_group_id: &str) -> Result<Quiz, ApiError> {
        WavedApiClient::get_quiz(self, challenge_group_id).await
    }

    async fn post_verification(
        &self,
        challenge_group_id: &str,
        fields: Vec<FormField>,
    ) -> Result<(), ApiError> {
        WavedApiClient::post_verification(self, challenge_group_id, fields).await
    }
}
