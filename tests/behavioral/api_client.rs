// ABOUTME: Behavioral tests for the platform API client against a mock HTTP server
// Verifies paths, headers, payloads and how failures become notices

use mockito::{Matcher, Server};

use super::fixtures::test_client;
use waved::error::{catch_server_error, ApiError, ErrorNotice, PageProps, SERVER_ERROR_MESSAGE};
use waved::register::{Gender, RegistrationState};

#[tokio::test]
async fn test_get_challenge_group() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/challengeGroups/info/42")
        .match_header("authorization", "Bearer token-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"groupTitle":"매일 코딩","verificationType":"LINK","participantCount":8,"challengeId":7}"#)
        .create_async()
        .await;

    let client = test_client(&server.url()).with_access_token("token-1");
    let group = client.get_challenge_group("42").await.unwrap();

    assert_eq!(group.group_title, "매일 코딩");
    assert_eq!(group.participant_count, 8);
    assert_eq!(group.challenge_id, Some(7));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_first_and_more_review_pages() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", "/challenges/7/reviews")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "0".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"content":[{"reviewId":1,"nickname":"wave","jobTitle":"PM","content":"좋아요","createdDate":"2024-03-01"}],"isLastPage":false}"#)
        .create_async()
        .await;
    let more = server
        .mock("GET", "/challenges/7/reviews")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .match_header("authorization", "")
        .with_status(200)
        .with_body(r#"{"content":[],"isLastPage":true}"#)
        .create_async()
        .await;

    let client = test_client(&server.url()).with_access_token("token-1");
    let page0 = client.get_reviews(7).await.unwrap();
    let page1 = client.get_more_reviews(1, 7).await.unwrap();

    assert_eq!(page0.content.len(), 1);
    assert!(!page0.is_last_page);
    assert!(page1.is_last_page);
    first.assert_async().await;
    more.assert_async().await;
}

#[tokio::test]
async fn test_edit_member_sends_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/members")
        .match_body(Matcher::Json(serde_json::json!({
            "termAgreement": true,
            "birthYear": "1995",
            "gender": "female",
            "nickname": "wave",
            "jobTitle": "PM"
        })))
        .with_status(200)
        .create_async()
        .await;

    let record = RegistrationState {
        term_agreement: true,
        birth_year: "1995".to_string(),
        gender: Some(Gender::Female),
        nickname: "wave".to_string(),
        job_title: "PM".to_string(),
    };
    test_client(&server.url()).edit_member(&record).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cancel_participation_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/payments/99/cancel")
        .with_status(200)
        .with_body(r#"{"message":"결제 취소 처리되었습니다."}"#)
        .create_async()
        .await;

    let ack = test_client(&server.url())
        .cancel_participation(99)
        .await
        .unwrap();
    assert_eq!(ack.message, "결제 취소 처리되었습니다.");
}

#[tokio::test]
async fn test_status_errors_carry_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/reviews/5")
        .with_status(404)
        .with_body(r#"{"message":"후기를 찾을 수 없습니다."}"#)
        .create_async()
        .await;

    let err = test_client(&server.url()).delete_review(5).await.unwrap_err();
    match &err {
        ApiError::Status { status, reason, message } => {
            assert_eq!(*status, 404);
            assert_eq!(reason, "Not Found");
            assert_eq!(message, "후기를 찾을 수 없습니다.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ErrorNotice::from_api_error(&err).error_msg, "후기를 찾을 수 없습니다.");
}

#[tokio::test]
async fn test_server_error_becomes_notice() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/challengeGroups/waiting")
        .with_status(500)
        .create_async()
        .await;

    let client = test_client(&server.url());
    let props = catch_server_error(client.get_recruiting_challenges()).await;
    assert_eq!(props, PageProps::Failed(ErrorNotice::new(SERVER_ERROR_MESSAGE)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/members/reviews")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = test_client(&server.url()).get_my_reviews().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
