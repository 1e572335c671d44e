// ABOUTME: Registration wizard driver wiring the state machine to the member API and navigation
// Guard failures are silent; submission and navigation failures are logged, never retried

use tracing::{debug, error, info};

use super::state::{BackEffect, RegisterPatch, RegistrationFlow};
use crate::api::MemberApi;
use crate::navigation::{Navigator, Route};

/// Result of asking the wizard to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not on the last step, or no job title yet
    NotReady,
    /// A previous submission has not finished
    AlreadyInFlight,
    /// Member updated; success route requested
    Submitted,
    /// Member update failed; the wizard stays on the last step
    Failed(String),
}

pub struct RegistrationWizard<A, N> {
    flow: RegistrationFlow,
    api: A,
    navigator: N,
}

impl<A: MemberApi, N: Navigator> RegistrationWizard<A, N> {
    pub fn new(api: A, navigator: N) -> Self {
        Self {
            flow: RegistrationFlow::new(),
            api,
            navigator,
        }
    }

    pub fn flow(&self) -> &RegistrationFlow {
        &self.flow
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn update_register_data(&mut self, patch: RegisterPatch) -> bool {
        self.flow.update(patch)
    }

    pub fn go_to_next_step(&mut self) -> bool {
        let advanced = self.flow.go_to_next_step();
        if advanced {
            debug!("Registration advanced to step {}", self.flow.step().number());
        }
        advanced
    }

    /// Step back, leaving the wizard through history navigation from step 1
    pub async fn go_to_previous_step(&mut self) -> BackEffect {
        let effect = self.flow.go_to_previous_step();
        match effect {
            BackEffect::ExitWizard => {
                info!("Registration cancelled from the first step");
                if let Err(e) = self.navigator.back().await {
                    error!("Failed to navigate back from registration: {}", e);
                }
            }
            BackEffect::Stepped => {
                debug!("Registration returned to step {}", self.flow.step().number());
            }
            BackEffect::Blocked => {
                debug!("Ignoring back navigation while submission is {:?}", self.flow.submission());
            }
        }
        effect
    }

    /// Send the record to the member API, then navigate to the success route
    pub async fn submit_member_info(&mut self) -> SubmitOutcome {
        if self.flow.is_submitting() {
            return SubmitOutcome::AlreadyInFlight;
        }
        let Some(payload) = self.flow.begin_submission() else {
            return SubmitOutcome::NotReady;
        };

        match self.api.edit_member(&payload).await {
            Ok(()) => {
                self.flow.complete_submission();
                info!("Member registration completed for {}", payload.nickname);
                if let Err(e) = self.navigator.push(&Route::RegisterSuccess).await {
                    error!("Failed to navigate after registration: {}", e);
                }
                SubmitOutcome::Submitted
            }
            Err(e) => {
                error!("Member registration failed: {}", e);
                let message = e.to_string();
                self.flow.fail_submission(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
