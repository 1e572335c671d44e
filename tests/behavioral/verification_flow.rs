// ABOUTME: Behavioral tests for posting verifications through the real client
// Success and duplicate answers redirect to the collection page, other failures stay put

use mockito::{Matcher, Server};

use super::fixtures::test_client;
use waved::api::VerificationType;
use waved::navigation::{HistoryNavigator, Route};
use waved::verification::{
    load_quiz, submit_verification, VerificationDraft, VerificationOutcome, VerificationTarget,
};

fn target(verification_type: VerificationType) -> VerificationTarget {
    VerificationTarget {
        challenge_group_id: "12".to_string(),
        my_challenge_id: Some("34".to_string()),
        verification_type,
    }
}

fn navigator() -> HistoryNavigator {
    HistoryNavigator::with_history(&[Route::ChallengeGroup {
        challenge_group_id: "12".to_string(),
    }])
}

#[tokio::test]
async fn test_link_verification_redirects_on_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/verifications/12")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex("name=\"link\"".to_string()))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let mut draft = VerificationDraft::new(VerificationType::Link);
    draft.text = "오늘 읽은 글".to_string();
    draft.link = "https://blog.example.com/post".to_string();
    assert!(draft.is_ready());

    let nav = navigator();
    let outcome = submit_verification(
        &test_client(&server.url()),
        &nav,
        &target(VerificationType::Link),
        &draft,
    )
    .await;

    assert_eq!(outcome, VerificationOutcome::Submitted);
    assert_eq!(
        nav.current().as_deref(),
        Some("/verification/collection/12?type=LINK&myChallengeId=34&successSubmission=true")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_forbidden_means_duplicate() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/verifications/12")
        .with_status(403)
        .create_async()
        .await;

    let mut draft = VerificationDraft::new(VerificationType::Text);
    draft.text = "정답".to_string();

    let nav = navigator();
    let outcome = submit_verification(
        &test_client(&server.url()),
        &nav,
        &target(VerificationType::Text),
        &draft,
    )
    .await;

    assert_eq!(outcome, VerificationOutcome::Duplicate);
    assert!(nav
        .current()
        .unwrap()
        .ends_with("duplicateSubmission=true"));
}

#[tokio::test]
async fn test_other_failures_stay_on_form() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/verifications/12")
        .with_status(502)
        .create_async()
        .await;

    let mut draft = VerificationDraft::new(VerificationType::Text);
    draft.text = "정답".to_string();

    let nav = navigator();
    let outcome = submit_verification(
        &test_client(&server.url()),
        &nav,
        &target(VerificationType::Text),
        &draft,
    )
    .await;

    assert!(matches!(outcome, VerificationOutcome::Failed(_)));
    assert_eq!(nav.current().as_deref(), Some("/challenge/12"));
}

#[tokio::test]
async fn test_text_quiz_is_loaded() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/challengeGroups/12/quiz")
        .with_status(200)
        .with_body(r#"{"question":"Rust의 소유권 규칙은?"}"#)
        .create_async()
        .await;

    let prompt = load_quiz(&test_client(&server.url()), &target(VerificationType::Text))
        .await
        .unwrap();
    assert_eq!(prompt.question, "Rust의 소유권 규칙은?");
    assert!(prompt.notice.is_none());
}
