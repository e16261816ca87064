#![allow(clippy::unwrap_used)]
// Integration tests for `TorboxClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use torbox_api::{
    ControlTorrentRequest, CreateTorrentRequest, Error, ResourceId, TorboxClient, TorrentOperation,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TorboxClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = TorboxClient::with_client(reqwest::Client::new(), base_url, "/v1/api");
    (server, client)
}

fn key() -> SecretString {
    "tb-test-key".to_string().into()
}

fn api_path(suffix: &str) -> String {
    format!("/v1/api/{suffix}")
}

// ── Auth precondition ───────────────────────────────────────────────

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.list_torrents(None).await;
    assert!(matches!(result, Err(Error::MissingApiKey)), "got: {result:?}");

    let empty: SecretString = String::new().into();
    let result = client.list_torrents(Some(&empty)).await;
    assert!(matches!(result, Err(Error::MissingApiKey)), "got: {result:?}");
}

#[tokio::test]
async fn test_public_endpoint_without_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": { "total_downloads": 10 } })),
        )
        .mount(&server)
        .await;

    let stats = client.stats(None).await.unwrap().unwrap();
    assert_eq!(stats.get("total_downloads"), Some(&json!(10)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_bearer_and_content_type_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .and(query_param("settings", "1"))
        .and(header("authorization", "Bearer tb-test-key"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": 1, "email": "user@example.com", "plan": 2 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.me(Some(&key()), true).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("user@example.com"));
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_torrents() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": 11, "name": "ubuntu.iso", "size": 1536, "progress": 0.5,
                  "download_state": "downloading", "created_at": "2024-06-15T10:30:00Z" },
                { "id": 12 }
            ]
        })))
        .mount(&server)
        .await;

    let torrents = client.list_torrents(Some(&key())).await.unwrap().unwrap();
    assert_eq!(torrents.len(), 2);
    assert_eq!(torrents[0].name.as_deref(), Some("ubuntu.iso"));
    assert_eq!(torrents[0].download_state.as_deref(), Some("downloading"));
    assert_eq!(torrents[1].id, ResourceId::Number(12));
    assert!(torrents[1].name.is_none());
}

#[tokio::test]
async fn test_list_without_data_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("webdl/mylist")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let downloads = client.list_web_downloads(Some(&key())).await.unwrap();
    assert!(downloads.is_none());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_torrent_sends_numeric_flags() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("torrents/createtorrent")))
        .and(body_json(json!({
            "magnet": "magnet:?xt=urn:btih:abc",
            "name": "",
            "seed": 1,
            "allow_zip": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateTorrentRequest {
        magnet: "magnet:?xt=urn:btih:abc".into(),
        name: String::new(),
        seed: 1,
        allow_zip: 0,
    };
    client.create_torrent(Some(&key()), &request).await.unwrap();
}

#[tokio::test]
async fn test_control_torrent_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("torrents/controltorrent")))
        .and(body_json(json!({ "torrent_id": 7, "operation": "pause" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ControlTorrentRequest {
        torrent_id: ResourceId::Number(7),
        operation: TorrentOperation::Pause,
    };
    client.control_torrent(Some(&key()), &request).await.unwrap();
}

#[tokio::test]
async fn test_request_download_link() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/requestdl")))
        .and(query_param("torrent_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": "https://cdn.example/file.zip"
        })))
        .mount(&server)
        .await;

    let link = client
        .request_download(Some(&key()), &ResourceId::Number(7))
        .await
        .unwrap();
    assert_eq!(link.as_deref(), Some("https://cdn.example/file.zip"));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_uses_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "success": false, "error": "BAD_TOKEN" })),
        )
        .mount(&server)
        .await;

    let result = client.me(Some(&key()), false).await;
    match result {
        Err(Error::Http { status, ref message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "BAD_TOKEN");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_falls_back_to_detail() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid torrent id" })),
        )
        .mount(&server)
        .await;

    let err = client
        .request_download(Some(&key()), &ResourceId::Number(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid torrent id");
}

#[tokio::test]
async fn test_http_error_without_body_synthesizes_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
        .mount(&server)
        .await;

    let err = client.list_torrents(Some(&key())).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_success_false_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("general/getupstatus")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "detail": "Maintenance"
        })))
        .mount(&server)
        .await;

    let result = client.up_status(None).await;
    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 200);
            assert_eq!(message, "Maintenance");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.list_usenet_downloads(Some(&key())).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let client = TorboxClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9").unwrap(),
        "/v1/api",
    );

    let err = client.stats(None).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
