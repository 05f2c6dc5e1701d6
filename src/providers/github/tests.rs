use mockito::Matcher;
use serde_json::json;

use super::*;
use crate::auth::Token;
use crate::error::ReporterError;
use crate::payload::{CommitState, StatusPayload};

fn deploy_payload() -> StatusPayload {
    StatusPayload {
        state: CommitState::Success,
        context: "Deploy".to_string(),
        target_url: "https://us-east-1.console.aws.amazon.com/codepipeline/home?region=us-east-1#/view/web".to_string(),
        description: Some("Successfully ran Deploy".to_string()),
    }
}

#[test]
fn test_github_client_normalizes_base_url() {
    let client = GitHubClient::new("https://ghe.example.com/api/v3").unwrap();
    assert_eq!(client.api_url().as_str(), "https://ghe.example.com/api/v3/");

    let client = GitHubClient::new("https://api.github.com/").unwrap();
    assert_eq!(client.api_url().as_str(), "https://api.github.com/");
}

#[test]
fn test_github_client_invalid_base_url() {
    let result = GitHubClient::new("not a url");
    assert!(matches!(result, Err(ReporterError::Configuration(_))));
}

#[tokio::test]
async fn test_create_commit_status_request_shape() {
    let mut server = mockito::Server::new_async().await;
    let status = server
        .mock("POST", "/repos/acme/app/statuses/deadbeef")
        .match_header("authorization", "token ghp_secret")
        .match_header("content-type", "application/json")
        .match_header("user-agent", USER_AGENT)
        .match_body(Matcher::Json(json!({
            "state": "success",
            "context": "Deploy",
            "target_url": "https://us-east-1.console.aws.amazon.com/codepipeline/home?region=us-east-1#/view/web",
            "description": "Successfully ran Deploy"
        })))
        .with_status(201)
        .with_body(r#"{"id":1,"state":"success"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url()).unwrap();
    client
        .create_commit_status(
            "acme",
            "app",
            "deadbeef",
            &deploy_payload(),
            &Token::from("ghp_secret"),
        )
        .await
        .unwrap();

    status.assert_async().await;
}

#[tokio::test]
async fn test_create_commit_status_keeps_enterprise_prefix() {
    let mut server = mockito::Server::new_async().await;
    let status = server
        .mock("POST", "/api/v3/repos/acme/app/statuses/deadbeef")
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let client = GitHubClient::new(&format!("{}/api/v3", server.url())).unwrap();
    client
        .create_commit_status(
            "acme",
            "app",
            "deadbeef",
            &deploy_payload(),
            &Token::from("ghp_secret"),
        )
        .await
        .unwrap();

    status.assert_async().await;
}

#[tokio::test]
async fn test_create_commit_status_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/repos/acme/app/statuses/deadbeef")
        .with_status(422)
        .with_body(r#"{"message":"No commit found for SHA: deadbeef"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url()).unwrap();
    let err = client
        .create_commit_status(
            "acme",
            "app",
            "deadbeef",
            &deploy_payload(),
            &Token::from("ghp_secret"),
        )
        .await
        .unwrap_err();

    assert!(err.is_report());
    match err {
        ReporterError::StatusRejected { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("No commit found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_create_commit_status_connection_failure() {
    // Nothing listens on the discard port.
    let client = GitHubClient::new("http://127.0.0.1:9").unwrap();
    let err = client
        .create_commit_status(
            "acme",
            "app",
            "deadbeef",
            &deploy_payload(),
            &Token::from("ghp_secret"),
        )
        .await
        .unwrap_err();

    assert!(err.is_report());
}

#[tokio::test]
async fn test_create_installation_token_headers() {
    let mut server = mockito::Server::new_async().await;
    let exchange = server
        .mock("POST", "/app/installations/42/access_tokens")
        .match_header("authorization", "Bearer signed.jwt.value")
        .match_header("accept", "application/vnd.github.machine-man-preview+json")
        .match_header("user-agent", USER_AGENT)
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"ghs_abc","expires_at":"2024-05-01T13:00:00Z","permissions":{"statuses":"write"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url()).unwrap();
    let token = client
        .create_installation_token("42", "signed.jwt.value")
        .await
        .unwrap();

    assert_eq!(token.as_str(), "ghs_abc");
    exchange.assert_async().await;
}

#[tokio::test]
async fn test_create_installation_token_rejected() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/app/installations/42/access_tokens")
        .with_status(401)
        .with_body(r#"{"message":"A JSON web token could not be decoded"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url()).unwrap();
    let err = client
        .create_installation_token("42", "signed.jwt.value")
        .await
        .unwrap_err();

    assert!(err.is_credential());
    match err {
        ReporterError::TokenExchange { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("JSON web token"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_create_installation_token_without_token_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/app/installations/42/access_tokens")
        .with_status(201)
        .with_body(r#"{"expires_at":"2024-05-01T13:00:00Z"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url()).unwrap();
    let err = client
        .create_installation_token("42", "signed.jwt.value")
        .await
        .unwrap_err();

    assert!(matches!(err, ReporterError::Credential(_)));
}
