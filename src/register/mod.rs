// ABOUTME: Member registration wizard
// Four validation-gated steps: terms, profile, nickname, job title

pub mod state;
pub mod validation;
pub mod wizard;

pub use state::{
    BackEffect, Gender, RegisterPatch, RegistrationFlow, RegistrationState, RegistrationStep,
    SubmissionState,
};
pub use validation::{
    is_birth_year_valid, is_nickname_valid, is_valid_link, nickname_validity, NicknameValidity,
    NICKNAME_MAX_CHARS,
};
pub use wizard::{RegistrationWizard, SubmitOutcome};
