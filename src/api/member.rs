// ABOUTME: Member update seam used by the registration wizard

use async_trait::async_trait;

use crate::api::client::WavedApiClient;
use crate::error::ApiError;
use crate::register::RegistrationState;

/// Accepts a completed registration record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberApi: Send + Sync {
    async fn edit_member(&self, record: &RegistrationState) -> Result<(), ApiError>;
}

#[async_trait]
impl MemberApi for WavedApiClient {
    async fn edit_member(&self, record: &RegistrationState) -> Result<(), ApiError> {
        WavedApiClient::edit_member(self, record).await
    }
}
