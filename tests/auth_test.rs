mod common;

use std::collections::HashMap;

use axum::http::StatusCode;
use base64::{Engine, engine::general_purpose::STANDARD};
use common::{CLIENT_ID, CLIENT_SECRET, FakeSpotify, Provider, REDIRECT_URI, http_client};
use fibtracks::{config::Config, error::Error, spotify::auth, utils};
use reqwest::Url;
use serde_json::json;

fn expected_basic_header() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", CLIENT_ID, CLIENT_SECRET))
    )
}

fn form(body: &str) -> HashMap<String, String> {
    Url::parse(&format!("http://localhost/?{}", body))
        .unwrap()
        .query_pairs()
        .into_owned()
        .collect()
}

#[tokio::test]
async fn test_authorization_request_url() {
    let fake = FakeSpotify::start(Provider::default()).await;
    let config = fake.config();

    let request = auth::authorization_request(&config).unwrap();
    let url = Url::parse(&request.url).unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    assert!(request.url.starts_with(&config.auth_url));
    assert_eq!(params["client_id"], CLIENT_ID);
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], REDIRECT_URI);
    assert_eq!(params["scope"], config.scope);
    assert_eq!(params["state"], request.state);
    assert_eq!(params["code_challenge_method"], "S256");
    assert_eq!(
        params["code_challenge"],
        utils::generate_code_challenge(&request.code_verifier)
    );
}

#[tokio::test]
async fn test_authorization_request_requires_credentials() {
    let result = auth::authorization_request(&Config::default());
    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[tokio::test]
async fn test_exchange_code_returns_provider_token() {
    let fake = FakeSpotify::start(Provider::default()).await;

    let token = auth::exchange_code(&http_client(), &fake.config(), "auth-code", None)
        .await
        .unwrap();

    assert_eq!(token.access_token, "X");
    assert_eq!(token.refresh_token.as_deref(), Some("Y"));
    assert_eq!(token.expires_in, 3600);

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/token");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(expected_basic_header().as_str())
    );

    let body = form(&requests[0].body);
    assert_eq!(body["grant_type"], "authorization_code");
    assert_eq!(body["code"], "auth-code");
    assert_eq!(body["redirect_uri"], REDIRECT_URI);
    assert!(!body.contains_key("code_verifier"));
}

#[tokio::test]
async fn test_exchange_code_sends_verifier() {
    let fake = FakeSpotify::start(Provider::default()).await;

    auth::exchange_code(&http_client(), &fake.config(), "auth-code", Some("verifier"))
        .await
        .unwrap();

    let body = form(&fake.requests()[0].body);
    assert_eq!(body["code_verifier"], "verifier");
}

#[tokio::test]
async fn test_exchange_code_unauthorized() {
    let fake = FakeSpotify::start(Provider {
        token_status: StatusCode::UNAUTHORIZED,
        token_body: json!({ "error": "invalid_client" }),
        ..Provider::default()
    })
    .await;

    let result = auth::exchange_code(&http_client(), &fake.config(), "auth-code", None).await;
    assert!(matches!(result, Err(Error::Token { status: 401 })));
}

#[tokio::test]
async fn test_exchange_code_missing_credentials_sends_nothing() {
    let fake = FakeSpotify::start(Provider::default()).await;
    let config = Config {
        client_secret: None,
        ..fake.config()
    };

    let result = auth::exchange_code(&http_client(), &config, "auth-code", None).await;

    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_refresh_access_token() {
    let fake = FakeSpotify::start(Provider {
        token_body: json!({ "access_token": "fresh", "token_type": "Bearer", "expires_in": 3600 }),
        ..Provider::default()
    })
    .await;

    let token = auth::refresh_access_token(&http_client(), &fake.config(), "old-refresh")
        .await
        .unwrap();

    assert_eq!(token.access_token, "fresh");
    // Spotify omitted a new refresh token, so the old one is kept
    assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));

    let requests = fake.requests();
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some(expected_basic_header().as_str())
    );
    let body = form(&requests[0].body);
    assert_eq!(body["grant_type"], "refresh_token");
    assert_eq!(body["refresh_token"], "old-refresh");
}

#[tokio::test]
async fn test_refresh_access_token_rotated() {
    let fake = FakeSpotify::start(Provider::default()).await;

    let token = auth::refresh_access_token(&http_client(), &fake.config(), "old-refresh")
        .await
        .unwrap();

    assert_eq!(token.refresh_token.as_deref(), Some("Y"));
}

#[tokio::test]
async fn test_refresh_access_token_unauthorized() {
    let fake = FakeSpotify::start(Provider {
        token_status: StatusCode::UNAUTHORIZED,
        ..Provider::default()
    })
    .await;

    let result = auth::refresh_access_token(&http_client(), &fake.config(), "old-refresh").await;
    assert!(matches!(result, Err(Error::Token { status: 401 })));
}

#[tokio::test]
async fn test_refresh_without_redirect_uri() {
    let fake = FakeSpotify::start(Provider::default()).await;
    let config = Config {
        redirect_uri: None,
        ..fake.config()
    };

    let token = auth::refresh_access_token(&http_client(), &config, "old-refresh").await;
    assert!(token.is_ok());
}
