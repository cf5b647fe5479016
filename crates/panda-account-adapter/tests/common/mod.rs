/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for panda-account-adapter tests

use panda_account_adapter::{ClientConfig, PandaClient};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CONFIG_PATH: &str = "/pandaoss.conf.json";
#[allow(dead_code)]
pub const PROBE_PATH: &str = "/globalize/v1/guest/comm/config";

/// Setup a mock HTTP server for testing. Built unpooled so dropping the
/// server closes its listener, letting tests simulate a real outage.
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::builder().start().await
}

/// Mount the domain config list on a server
#[allow(dead_code)]
pub async fn mount_domain_config(server: &MockServer, candidates: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidates))
        .mount(server)
        .await;
}

/// Mount a healthy probe endpoint on a server
#[allow(dead_code)]
pub async fn mount_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(PROBE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(server)
        .await;
}

/// Wrap a payload in the standard response envelope
#[allow(dead_code)]
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({"status": "success", "message": "ok", "data": data})
}

/// Build a client whose config URL and state directory point at the test
#[allow(dead_code)]
pub fn client_for(server: &MockServer, state_dir: &TempDir) -> PandaClient {
    let config_url = format!("{}{}", server.uri(), CONFIG_PATH);
    PandaClient::with_config_and_urls(ClientConfig::default(), &config_url, state_dir.path())
        .expect("client init")
}

/// Build a server serving its own config entry, probe, and API endpoints,
/// plus a client pointed at it
#[allow(dead_code)]
pub async fn ready_client(server: &MockServer) -> (PandaClient, TempDir) {
    mount_domain_config(
        server,
        json!([{"name": "primary", "url": server.uri()}]),
    )
    .await;
    mount_probe(server).await;

    let dir = TempDir::new().expect("temp dir");
    let client = client_for(server, &dir);
    (client, dir)
}

/// A URL nothing listens on; connecting gets refused immediately
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
