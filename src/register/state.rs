// ABOUTME: State machine for the member registration wizard
// Tracks the current step, the accumulated record, and submission progress

use serde::{Deserialize, Serialize};

use super::validation::is_nickname_valid;

/// Gender collected on the privacy step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse user input ("male", "f", ...), case-insensitive
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

/// The record accumulated across the wizard and sent as the member update payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationState {
    pub term_agreement: bool,
    /// Numeric string, empty when unset
    pub birth_year: String,
    pub gender: Option<Gender>,
    pub nickname: String,
    pub job_title: String,
}

/// Partial record merged into [`RegistrationState`]; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterPatch {
    pub term_agreement: Option<bool>,
    pub birth_year: Option<String>,
    pub gender: Option<Option<Gender>>,
    pub nickname: Option<String>,
    pub job_title: Option<String>,
}

impl RegisterPatch {
    pub fn with_term_agreement(mut self, agreed: bool) -> Self {
        self.term_agreement = Some(agreed);
        self
    }

    pub fn with_birth_year(mut self, birth_year: impl Into<String>) -> Self {
        self.birth_year = Some(birth_year.into());
        self
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = Some(job_title.into());
        self
    }

    /// Patch that resets every field to its default
    pub fn reset_all() -> Self {
        Self::default()
            .with_term_agreement(false)
            .with_birth_year("")
            .with_gender(None)
            .with_nickname("")
            .with_job_title("")
    }
}

impl RegistrationState {
    /// Shallow merge: fields present in the patch overwrite the record
    pub fn merge(&mut self, patch: RegisterPatch) {
        if let Some(agreed) = patch.term_agreement {
            self.term_agreement = agreed;
        }
        if let Some(birth_year) = patch.birth_year {
            self.birth_year = birth_year;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(nickname) = patch.nickname {
            self.nickname = nickname;
        }
        if let Some(job_title) = patch.job_title {
            self.job_title = job_title;
        }
    }
}

/// Steps in the registration wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationStep {
    #[default]
    TermAgreement,
    Privacy,
    Nickname,
    JobTitle,
}

impl RegistrationStep {
    /// Get all steps in order
    pub fn all() -> &'static [RegistrationStep] {
        &[Self::TermAgreement, Self::Privacy, Self::Nickname, Self::JobTitle]
    }

    /// Get the step number (1-indexed for display)
    pub fn number(&self) -> usize {
        match self {
            Self::TermAgreement => 1,
            Self::Privacy => 2,
            Self::Nickname => 3,
            Self::JobTitle => 4,
        }
    }

    /// Get the total number of steps
    pub fn total() -> usize {
        4
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TermAgreement => "Terms of service",
            Self::Privacy => "Profile",
            Self::Nickname => "Nickname",
            Self::JobTitle => "Job title",
        }
    }

    /// Heading shown above the step's inputs
    pub fn guide(&self) -> &'static str {
        match self {
            Self::TermAgreement => "서비스 이용 약관에 동의해주세요.",
            Self::Privacy => "회원님의 정보를 입력해주세요.",
            Self::Nickname => "닉네임을 입력해주세요.",
            Self::JobTitle => "해당하는 직군을 선택해주세요.",
        }
    }

    /// Forward guard for this step
    pub fn can_advance(&self, record: &RegistrationState) -> bool {
        match self {
            Self::TermAgreement => record.term_agreement,
            Self::Privacy => !record.birth_year.is_empty(),
            Self::Nickname => is_nickname_valid(&record.nickname),
            // Completion is a submission, not a step
            Self::JobTitle => false,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            Self::TermAgreement => Some(Self::Privacy),
            Self::Privacy => Some(Self::Nickname),
            Self::Nickname => Some(Self::JobTitle),
            Self::JobTitle => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::TermAgreement => None,
            Self::Privacy => Some(Self::TermAgreement),
            Self::Nickname => Some(Self::Privacy),
            Self::JobTitle => Some(Self::Nickname),
        }
    }

    /// Fields cleared when leaving this step backwards.
    ///
    /// Both the step being left and the step being returned to lose their
    /// answers, so the user re-enters them.
    pub fn cleared_on_back(&self) -> RegisterPatch {
        match self {
            Self::TermAgreement => RegisterPatch::reset_all(),
            Self::Privacy => RegisterPatch::default()
                .with_term_agreement(false)
                .with_birth_year("")
                .with_gender(None),
            Self::Nickname => RegisterPatch::default()
                .with_birth_year("")
                .with_gender(None)
                .with_nickname(""),
            Self::JobTitle => RegisterPatch::default().with_nickname("").with_job_title(""),
        }
    }
}

/// Progress of the member update call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Completed,
}

/// What a backward transition asks of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackEffect {
    /// Moved to the previous step
    Stepped,
    /// Left the wizard from step 1; the caller navigates back in history
    ExitWizard,
    /// Ignored because a submission is in flight or already completed
    Blocked,
}

/// Full registration wizard state: step, record and submission progress.
///
/// Transitions are available both as pure functions (`forward`, `backward`)
/// returning the next value and as in-place conveniences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFlow {
    step: RegistrationStep,
    record: RegistrationState,
    submission: SubmissionState,
    last_error: Option<String>,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn record(&self) -> &RegistrationState {
        &self.record
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    /// Message from the most recent failed submission, cleared on the next attempt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::InFlight
    }

    fn is_locked(&self) -> bool {
        self.submission != SubmissionState::Idle
    }

    /// Merge user input into the record. Returns false when locked by a submission.
    pub fn update(&mut self, patch: RegisterPatch) -> bool {
        if self.is_locked() {
            return false;
        }
        self.record.merge(patch);
        true
    }

    /// Whether the "next" control should be enabled
    pub fn can_go_next(&self) -> bool {
        !self.is_locked() && self.step.can_advance(&self.record)
    }

    /// Whether the "complete" control should be enabled
    pub fn can_submit(&self) -> bool {
        self.step == RegistrationStep::JobTitle
            && !self.record.job_title.is_empty()
            && self.submission == SubmissionState::Idle
    }

    /// Next state after a forward transition; unchanged when the guard fails
    pub fn forward(&self) -> Self {
        let mut next = self.clone();
        if self.can_go_next() {
            if let Some(step) = self.step.next() {
                next.step = step;
            }
        }
        next
    }

    /// Next state after a backward transition, plus what the caller must do
    pub fn backward(&self) -> (Self, BackEffect) {
        if self.is_locked() {
            return (self.clone(), BackEffect::Blocked);
        }

        let mut next = self.clone();
        next.record.merge(self.step.cleared_on_back());
        next.last_error = None;
        match self.step.previous() {
            Some(step) => {
                next.step = step;
                (next, BackEffect::Stepped)
            }
            None => (next, BackEffect::ExitWizard),
        }
    }

    /// Apply [`forward`](Self::forward). Returns true if the step changed.
    pub fn go_to_next_step(&mut self) -> bool {
        let next = self.forward();
        let advanced = next.step != self.step;
        *self = next;
        advanced
    }

    /// Apply [`backward`](Self::backward)
    pub fn go_to_previous_step(&mut self) -> BackEffect {
        let (next, effect) = self.backward();
        *self = next;
        effect
    }

    /// Enter the in-flight state and hand back the payload to send.
    ///
    /// Returns `None` unless on the last step with a job title and no
    /// submission already running, so at most one call goes out per
    /// completion.
    pub fn begin_submission(&mut self) -> Option<RegistrationState> {
        if !self.can_submit() {
            return None;
        }
        self.submission = SubmissionState::InFlight;
        self.last_error = None;
        Some(self.record.clone())
    }

    pub fn complete_submission(&mut self) {
        if self.submission == SubmissionState::InFlight {
            self.submission = SubmissionState::Completed;
        }
    }

    /// Return to idle on the last step, keeping the record as entered
    pub fn fail_submission(&mut self, message: impl Into<String>) {
        if self.submission == SubmissionState::InFlight {
            self.submission = SubmissionState::Idle;
            self.last_error = Some(message.into());
        }
    }
}
