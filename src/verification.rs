// ABOUTME: Verification post flow: form assembly by type, submission outcome and redirect
// A 403 Forbidden answer means the member already verified today

use serde::Serialize;
use tracing::{error, info, warn};

use crate::api::types::{FormField, Quiz, VerificationType};
use crate::api::VerificationApi;
use crate::error::{ApiError, ErrorNotice};
use crate::navigation::{CollectionFlag, Navigator, Route};
use crate::register::is_valid_link;

/// Shown while the quiz question loads
pub const QUIZ_LOADING: &str = "문제를 불러오고 있습니다.";
/// Shown when the quiz question could not be loaded
pub const QUIZ_LOAD_FAILED: &str = "문제를 불러오는데 실패했습니다.";

/// Photo attached to a PICTURE verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// What the member has entered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationDraft {
    pub verification_type: VerificationType,
    pub text: String,
    pub file: Option<Attachment>,
    pub link: String,
}

impl VerificationDraft {
    pub fn new(verification_type: VerificationType) -> Self {
        Self {
            verification_type,
            ..Self::default()
        }
    }

    /// Whether the submit control should be enabled
    pub fn is_ready(&self) -> bool {
        match self.verification_type {
            VerificationType::Text => !self.text.trim().is_empty(),
            VerificationType::Picture => self.file.is_some(),
            VerificationType::Link => is_valid_link(&self.link),
        }
    }

    /// Multipart fields for this draft's verification type
    pub fn form_fields(&self) -> Vec<FormField> {
        match self.verification_type {
            VerificationType::Link => vec![
                FormField::text("content", self.text.clone()),
                FormField::text("link", self.link.clone()),
            ],
            VerificationType::Picture => self
                .file
                .iter()
                .map(|file| FormField::File {
                    name: "imageUrl".to_string(),
                    file_name: file.file_name.clone(),
                    bytes: file.bytes.clone(),
                })
                .collect(),
            VerificationType::Text => vec![FormField::text("content", self.text.clone())],
        }
    }
}

/// Where a verification is posted from and redirected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationTarget {
    pub challenge_group_id: String,
    pub my_challenge_id: Option<String>,
    pub verification_type: VerificationType,
}

impl VerificationTarget {
    pub fn collection_route(&self, flag: CollectionFlag) -> Route {
        Route::VerificationCollection {
            challenge_group_id: self.challenge_group_id.clone(),
            verification_type: self.verification_type,
            my_challenge_id: self.my_challenge_id.clone(),
            flag: Some(flag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Submitted,
    /// Already verified for today
    Duplicate,
    /// Any other failure; the member stays on the form
    Failed(String),
}

impl VerificationOutcome {
    pub fn from_result(result: Result<(), ApiError>) -> Self {
        match result {
            Ok(()) => Self::Submitted,
            Err(ApiError::Status { status: 403, reason, .. }) if reason == "Forbidden" => {
                Self::Duplicate
            }
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Collection page flag to redirect with, if the flow leaves the form
    pub fn collection_flag(&self) -> Option<CollectionFlag> {
        match self {
            Self::Submitted => Some(CollectionFlag::SuccessSubmission),
            Self::Duplicate => Some(CollectionFlag::DuplicateSubmission),
            Self::Failed(_) => None,
        }
    }
}

/// Quiz text to display, plus a notice when loading failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPrompt {
    pub question: String,
    pub notice: Option<ErrorNotice>,
}

impl QuizPrompt {
    pub fn from_result(result: Result<Quiz, ApiError>) -> Self {
        match result {
            Ok(quiz) => Self {
                question: quiz.question,
                notice: None,
            },
            Err(e) => {
                error!("Failed to load verification quiz: {}", e);
                Self {
                    question: QUIZ_LOAD_FAILED.to_string(),
                    notice: Some(ErrorNotice::new(QUIZ_LOAD_FAILED)),
                }
            }
        }
    }
}

/// Load the quiz for TEXT verifications; other types have none
pub async fn load_quiz<A: VerificationApi + ?Sized>(
    api: &A,
    target: &VerificationTarget,
) -> Option<QuizPrompt> {
    if target.verification_type != VerificationType::Text {
        return None;
    }
    Some(QuizPrompt::from_result(
        api.get_quiz(&target.challenge_group_id).await,
    ))
}

/// Post the draft and redirect to the collection page when the flow leaves the form
pub async fn submit_verification<A, N>(
    api: &A,
    navigator: &N,
    target: &VerificationTarget,
    draft: &VerificationDraft,
) -> VerificationOutcome
where
    A: VerificationApi + ?Sized,
    N: Navigator + ?Sized,
{
    let result = api
        .post_verification(&target.challenge_group_id, draft.form_fields())
        .await;
    let outcome = VerificationOutcome::from_result(result);

    match &outcome {
        VerificationOutcome::Submitted => info!(
            "Verification submitted for challenge group {}",
            target.challenge_group_id
        ),
        VerificationOutcome::Duplicate => warn!(
            "Verification already submitted today for challenge group {}",
            target.challenge_group_id
        ),
        VerificationOutcome::Failed(message) => error!("Verification post failed: {}", message),
    }

    if let Some(flag) = outcome.collection_flag() {
        if let Err(e) = navigator.replace(&target.collection_route(flag)).await {
            error!("Failed to navigate to verification collection: {}", e);
        }
    }
    outcome
}
