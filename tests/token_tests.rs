use newsletter_digest::clients::{OAuthTokenProvider, TokenSource};
use newsletter_digest::errors::DigestError;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OAuthTokenProvider {
    OAuthTokenProvider::new(
        reqwest::Client::new(),
        format!("{}/token", server.uri()),
        "client-id".to_string(),
        "client-secret".to_string(),
        "refresh-token".to_string(),
    )
}

#[tokio::test]
async fn test_exchanges_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-token"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = provider(&server).access_token().await.unwrap();
    assert_eq!(token, "ya29.token");
}

#[tokio::test]
async fn test_rejection_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    match provider(&server).access_token().await {
        Err(DigestError::UpstreamAuth { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected UpstreamAuth, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fresh_token_per_call_without_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "t", "expires_in": 3600})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider(&server);
    provider.access_token().await.unwrap();
    provider.access_token().await.unwrap();
}

#[tokio::test]
async fn test_cache_reuses_unexpired_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "cached", "expires_in": 3600})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server).with_cache();
    assert_eq!(provider.access_token().await.unwrap(), "cached");
    assert_eq!(provider.access_token().await.unwrap(), "cached");
}

#[tokio::test]
async fn test_cache_refreshes_token_close_to_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "short", "expires_in": 60})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider(&server).with_cache();
    provider.access_token().await.unwrap();
    provider.access_token().await.unwrap();
}
