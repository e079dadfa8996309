use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use polymarket_keys::deriver::{DeriverConfig, derive_credentials, run, verify_credentials};

const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

fn config(server: &MockServer) -> DeriverConfig {
    DeriverConfig::new(KEY)
        .endpoint(server.uri())
        .chain_id(137)
        .timeout(Duration::from_millis(500))
}

async fn mount_credentials(server: &MockServer, status: u16) {
    let body = if status == 200 {
        serde_json::json!({ "apiKey": "K1", "secret": "S1", "passphrase": "P1" })
    } else {
        serde_json::json!({ "error": "Could not create api key" })
    };
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "apiKey": "K1",
            "secret": "S1",
            "passphrase": "P1"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_prints_three_lines() {
    let server = MockServer::start().await;
    mount_credentials(&server, 200).await;

    let mut out = Vec::new();
    let creds = run(&config(&server), &mut out).await.unwrap();

    assert_eq!(creds.api_key, "K1");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "POLYMARKET_API_KEY=K1\nPOLYMARKET_SECRET=S1\nPOLYMARKET_PASSPHRASE=P1\n"
    );
}

#[tokio::test]
async fn test_repeated_derivation_returns_same_credentials() {
    let server = MockServer::start().await;
    // The key already exists: creation is refused and the existing set is derived.
    mount_credentials(&server, 400).await;

    let config = config(&server);
    let first = derive_credentials(&config).await.unwrap();
    let second = derive_credentials(&config).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_rejected_key_prints_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Unauthorized/Invalid api key"
        })))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = run(&config(&server), &mut out).await.unwrap_err();

    assert!(err.is_auth());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_timeout_prints_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = run(&config(&server), &mut out).await.unwrap_err();

    assert!(err.is_network());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_verify_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "apiKey": "K1",
            "secret": "c2VjcmV0",
            "passphrase": "P1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/api-keys"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "apiKeys": ["K0", "K1"] })),
        )
        .mount(&server)
        .await;

    let config = config(&server);
    let creds = derive_credentials(&config).await.unwrap();

    assert!(verify_credentials(&config, &creds).await.unwrap());
}
