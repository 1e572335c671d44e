// ABOUTME: Behavioral tests for the registration wizard state machine
// Covers forward guards, reset-on-back, submission gating and the end-to-end flow

use pretty_assertions::assert_eq;

use super::fixtures::{new_wizard, wizard_at, RecordingMemberApi};
use waved::register::{
    BackEffect, Gender, RegisterPatch, RegistrationFlow, RegistrationState, RegistrationStep,
    SubmissionState, SubmitOutcome,
};

fn filled_record() -> RegistrationState {
    RegistrationState {
        term_agreement: true,
        birth_year: "1995".to_string(),
        gender: Some(Gender::Male),
        nickname: "wave".to_string(),
        job_title: "PM".to_string(),
    }
}

fn patch_all(record: &RegistrationState) -> RegisterPatch {
    RegisterPatch::default()
        .with_term_agreement(record.term_agreement)
        .with_birth_year(record.birth_year.clone())
        .with_gender(record.gender)
        .with_nickname(record.nickname.clone())
        .with_job_title(record.job_title.clone())
}

/// Forward with a failing guard changes nothing, for each of steps 1-3
#[test]
fn test_forward_with_guard_false_is_noop() {
    let blocked = [
        (RegistrationStep::TermAgreement, RegisterPatch::default().with_term_agreement(false)),
        (RegistrationStep::Privacy, RegisterPatch::default().with_birth_year("")),
        (RegistrationStep::Nickname, RegisterPatch::default().with_nickname("")),
    ];

    for (step, patch) in blocked {
        let mut wizard = wizard_at(step, RecordingMemberApi::new());
        wizard.update_register_data(patch);
        let before = wizard.flow().clone();

        assert!(!wizard.go_to_next_step(), "guard should block at {step:?}");
        assert_eq!(wizard.flow(), &before);
    }
}

/// Forward with a passing guard moves exactly one step and leaves the record alone
#[test]
fn test_forward_with_guard_true_advances_one_step() {
    for step in [
        RegistrationStep::TermAgreement,
        RegistrationStep::Privacy,
        RegistrationStep::Nickname,
    ] {
        let mut wizard = wizard_at(step, RecordingMemberApi::new());
        let patch = match step {
            RegistrationStep::TermAgreement => RegisterPatch::default().with_term_agreement(true),
            RegistrationStep::Privacy => RegisterPatch::default().with_birth_year("2001"),
            _ => RegisterPatch::default().with_nickname("tide"),
        };
        wizard.update_register_data(patch);
        let record_before = wizard.flow().record().clone();

        assert!(wizard.go_to_next_step());
        assert_eq!(wizard.flow().step().number(), step.number() + 1);
        assert_eq!(wizard.flow().record(), &record_before);
    }
}

/// Back from steps 2-4 steps down once and clears exactly the listed fields
#[tokio::test]
async fn test_backward_clears_exactly_listed_fields() {
    let cases = [
        (
            RegistrationStep::Privacy,
            RegistrationState {
                nickname: "wave".to_string(),
                job_title: "PM".to_string(),
                ..RegistrationState::default()
            },
        ),
        (
            RegistrationStep::Nickname,
            RegistrationState {
                term_agreement: true,
                job_title: "PM".to_string(),
                ..RegistrationState::default()
            },
        ),
        (
            RegistrationStep::JobTitle,
            RegistrationState {
                term_agreement: true,
                birth_year: "1995".to_string(),
                gender: Some(Gender::Male),
                ..RegistrationState::default()
            },
        ),
    ];

    for (step, expected) in cases {
        let mut wizard = wizard_at(step, RecordingMemberApi::new());
        wizard.update_register_data(patch_all(&filled_record()));

        assert_eq!(wizard.go_to_previous_step().await, BackEffect::Stepped);
        assert_eq!(wizard.flow().step().number(), step.number() - 1);
        assert_eq!(wizard.flow().record(), &expected, "fields after leaving {step:?}");
    }
}

/// Back from step 1 navigates back in history and resets the record
#[tokio::test]
async fn test_backward_from_first_step_exits() {
    let mut wizard = new_wizard(RecordingMemberApi::new());
    wizard.update_register_data(patch_all(&filled_record()));

    assert_eq!(wizard.go_to_previous_step().await, BackEffect::ExitWizard);
    assert_eq!(wizard.flow().record(), &RegistrationState::default());
    assert_eq!(wizard.navigator().current().as_deref(), Some("/home"));
}

/// Submission happens only on step 4 with a job title
#[tokio::test]
async fn test_submission_gating() {
    let mut wizard = wizard_at(RegistrationStep::JobTitle, RecordingMemberApi::new());
    wizard.update_register_data(RegisterPatch::default().with_job_title(""));
    assert_eq!(wizard.submit_member_info().await, SubmitOutcome::NotReady);
    assert!(wizard.api().calls().is_empty());

    wizard.update_register_data(RegisterPatch::default().with_job_title("designer"));
    assert_eq!(wizard.submit_member_info().await, SubmitOutcome::Submitted);
    let calls = wizard.api().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(&calls[0], wizard.flow().record());

    // Earlier steps never submit, even with a job title
    let mut early = wizard_at(RegistrationStep::Nickname, RecordingMemberApi::new());
    early.update_register_data(RegisterPatch::default().with_job_title("designer"));
    assert_eq!(early.submit_member_info().await, SubmitOutcome::NotReady);
    assert!(early.api().calls().is_empty());
}

/// Full happy path from defaults to the success route
#[tokio::test]
async fn test_end_to_end_registration() {
    let mut wizard = new_wizard(RecordingMemberApi::new());

    wizard.update_register_data(RegisterPatch::default().with_term_agreement(true));
    assert!(wizard.go_to_next_step());
    assert_eq!(wizard.flow().step().number(), 2);

    wizard.update_register_data(RegisterPatch::default().with_birth_year("1995"));
    assert!(wizard.go_to_next_step());
    assert_eq!(wizard.flow().step().number(), 3);

    wizard.update_register_data(RegisterPatch::default().with_nickname("wave"));
    assert!(wizard.go_to_next_step());
    assert_eq!(wizard.flow().step().number(), 4);

    wizard.update_register_data(RegisterPatch::default().with_job_title("PM"));
    assert_eq!(wizard.submit_member_info().await, SubmitOutcome::Submitted);

    let calls = wizard.api().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        serde_json::to_value(&calls[0]).unwrap(),
        serde_json::json!({
            "termAgreement": true,
            "birthYear": "1995",
            "gender": null,
            "nickname": "wave",
            "jobTitle": "PM"
        })
    );
    assert_eq!(wizard.navigator().current().as_deref(), Some("/register/success"));
    assert_eq!(wizard.flow().submission(), SubmissionState::Completed);

    // A repeated trigger after completion sends nothing more
    assert_eq!(wizard.submit_member_info().await, SubmitOutcome::NotReady);
    assert_eq!(wizard.api().calls().len(), 1);
}

/// Nickname boundary: 10 characters pass, 11 block
#[test]
fn test_nickname_length_boundary() {
    let mut wizard = wizard_at(RegistrationStep::Nickname, RecordingMemberApi::new());
    wizard.update_register_data(RegisterPatch::default().with_nickname("abcdefghijk"));
    assert!(!wizard.flow().can_go_next());
    assert!(!wizard.go_to_next_step());
    assert_eq!(wizard.flow().step(), RegistrationStep::Nickname);

    wizard.update_register_data(RegisterPatch::default().with_nickname("abcdefghij"));
    assert!(wizard.flow().can_go_next());
    assert!(wizard.go_to_next_step());
    assert_eq!(wizard.flow().step(), RegistrationStep::JobTitle);
}

/// A second trigger while the first call is still in flight is ignored
#[test]
fn test_double_submit_sends_one_payload() {
    let mut flow = RegistrationFlow::new();
    flow.update(RegisterPatch::default().with_term_agreement(true));
    flow.go_to_next_step();
    flow.update(RegisterPatch::default().with_birth_year("1995"));
    flow.go_to_next_step();
    flow.update(RegisterPatch::default().with_nickname("wave"));
    flow.go_to_next_step();
    flow.update(RegisterPatch::default().with_job_title("PM"));

    let payloads: Vec<RegistrationState> =
        (0..3).filter_map(|_| flow.begin_submission()).collect();

    assert_eq!(payloads.len(), 1);
    assert!(flow.is_submitting());
}

/// Failure keeps the wizard on step 4 with the record intact
#[tokio::test]
async fn test_failed_submission_keeps_state() {
    let mut wizard = wizard_at(RegistrationStep::JobTitle, RecordingMemberApi::failing(500));
    wizard.update_register_data(RegisterPatch::default().with_job_title("PM"));
    let record_before = wizard.flow().record().clone();

    let outcome = wizard.submit_member_info().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(wizard.flow().step(), RegistrationStep::JobTitle);
    assert_eq!(wizard.flow().record(), &record_before);
    assert_eq!(wizard.flow().submission(), SubmissionState::Idle);
    assert!(wizard.flow().last_error().is_some());
    assert_eq!(wizard.navigator().current().as_deref(), Some("/register"));
}
