// ABOUTME: Shared test fixtures and utilities for behavioral tests
//
// Provides:
// - RecordingMemberApi: MemberApi fake that records every payload
// - wizard_at(): RegistrationWizard advanced to a given step with valid answers
// - test_client(): API client pointed at a mock server

use async_trait::async_trait;
use std::sync::Mutex;

use waved::api::{MemberApi, WavedApiClient};
use waved::config::ApiConfig;
use waved::error::ApiError;
use waved::navigation::{HistoryNavigator, Route};
use waved::register::{RegisterPatch, RegistrationState, RegistrationStep, RegistrationWizard};

/// Member API fake that records payloads and optionally fails
#[derive(Default)]
pub struct RecordingMemberApi {
    calls: Mutex<Vec<RegistrationState>>,
    fail_with_status: Option<u16>,
}

impl RecordingMemberApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RegistrationState> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MemberApi for RecordingMemberApi {
    async fn edit_member(&self, record: &RegistrationState) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(record.clone());
        match self.fail_with_status {
            Some(status) => Err(ApiError::Status {
                status,
                reason: String::new(),
                message: "member update failed".to_string(),
            }),
            None => Ok(()),
        }
    }
}

pub type TestWizard = RegistrationWizard<RecordingMemberApi, HistoryNavigator>;

/// Fresh wizard entered from the home page
pub fn new_wizard(api: RecordingMemberApi) -> TestWizard {
    RegistrationWizard::new(
        api,
        HistoryNavigator::with_history(&[Route::Home, Route::Register]),
    )
}

/// Wizard advanced to `step`, answering every earlier step validly
pub fn wizard_at(step: RegistrationStep, api: RecordingMemberApi) -> TestWizard {
    let mut wizard = new_wizard(api);
    while wizard.flow().step() != step {
        let patch = match wizard.flow().step() {
            RegistrationStep::TermAgreement => RegisterPatch::default().with_term_agreement(true),
            RegistrationStep::Privacy => RegisterPatch::default().with_birth_year("1995"),
            RegistrationStep::Nickname => RegisterPatch::default().with_nickname("wave"),
            RegistrationStep::JobTitle => RegisterPatch::default().with_job_title("PM"),
        };
        wizard.update_register_data(patch);
        assert!(wizard.go_to_next_step(), "fixture failed to advance");
    }
    wizard
}

/// API client for a mockito server
pub fn test_client(base_url: &str) -> WavedApiClient {
    WavedApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    })
    .unwrap()
}
