use std::sync::Arc;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use wiremock::matchers::{header, header_exists, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use polymarket_keys::auth::{ApiCredentials, signer_from_hex};
use polymarket_keys::clob::ClobClient;
use polymarket_keys::PolymarketError;

const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
const ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

fn build_client(server: &MockServer) -> ClobClient {
    let signer = signer_from_hex(KEY).unwrap();
    ClobClient::builder()
        .base_url(server.uri())
        .chain_id(137)
        .signer(Arc::new(signer))
        .timeout(Duration::from_millis(500))
        .build()
}

fn credentials_body(key: &str) -> serde_json::Value {
    serde_json::json!({
        "apiKey": key,
        "secret": URL_SAFE.encode("test_secret"),
        "passphrase": format!("{key}-passphrase")
    })
}

#[tokio::test]
async fn test_create_api_key_sends_l1_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .and(header("poly_address", ADDRESS))
        .and(header("poly_nonce", "0"))
        .and(header_exists("poly_signature"))
        .and(header_exists("poly_timestamp"))
        .and(header_regex("user-agent", "^polymarket-keys/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body("K1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let creds = client.create_api_key(None).await.unwrap();

    assert_eq!(creds.api_key, "K1");
    assert_eq!(creds.expose_passphrase(), "K1-passphrase");
}

#[tokio::test]
async fn test_derive_api_key_with_nonce() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .and(header("poly_nonce", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body("K7")))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let creds = client.derive_api_key(Some(7)).await.unwrap();

    assert_eq!(creds.api_key, "K7");
}

#[tokio::test]
async fn test_create_or_derive_falls_back_when_key_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "Could not create api key" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body("EXISTING")))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let creds = client.create_or_derive_api_key(None).await.unwrap();

    assert_eq!(creds.api_key, "EXISTING");
}

#[tokio::test]
async fn test_create_or_derive_does_not_fall_back_on_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid L1 Request headers" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body("K1")))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_or_derive_api_key(None).await.unwrap_err();

    match err {
        PolymarketError::Auth(message) => assert_eq!(message, "Invalid L1 Request headers"),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.derive_api_key(None).await.unwrap_err();

    match err {
        PolymarketError::Api(api_error) => {
            assert_eq!(api_error.status, 503);
            assert!(api_error.is_server_error());
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_credential_field_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "apiKey": "K1",
            "secret": "",
            "passphrase": "P1"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.derive_api_key(None).await.unwrap_err();

    assert!(matches!(err, PolymarketError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/api-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(credentials_body("K1"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.create_or_derive_api_key(None).await.unwrap_err();

    assert!(matches!(err, PolymarketError::Timeout));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let signer = signer_from_hex(KEY).unwrap();
    let client = ClobClient::builder()
        .base_url("http://127.0.0.1:1")
        .signer(Arc::new(signer))
        .timeout(Duration::from_secs(2))
        .build();

    let err = client.create_or_derive_api_key(None).await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {err:?}");
}

#[tokio::test]
async fn test_server_time_used_for_signature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1700000000"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/derive-api-key"))
        .and(header("poly_timestamp", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credentials_body("K1")))
        .expect(1)
        .mount(&server)
        .await;

    let signer = signer_from_hex(KEY).unwrap();
    let client = ClobClient::builder()
        .base_url(server.uri())
        .signer(Arc::new(signer))
        .use_server_time(true)
        .build();

    assert_eq!(client.get_server_time().await.unwrap(), 1_700_000_000);
    let creds = client.derive_api_key(None).await.unwrap();
    assert_eq!(creds.api_key, "K1");
}

#[tokio::test]
async fn test_get_api_keys_sends_l2_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/api-keys"))
        .and(header("poly_address", ADDRESS))
        .and(header("poly_api_key", "K1"))
        .and(header("poly_passphrase", "P1"))
        .and(header_exists("poly_signature"))
        .and(header_exists("poly_timestamp"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "apiKeys": ["K1"] })),
        )
        .mount(&server)
        .await;

    let signer = signer_from_hex(KEY).unwrap();
    let client = ClobClient::builder()
        .base_url(server.uri())
        .signer(Arc::new(signer))
        .api_credentials(ApiCredentials::new("K1", URL_SAFE.encode("secret"), "P1"))
        .build();

    let keys = client.get_api_keys().await.unwrap();
    assert!(keys.contains("K1"));
}
