/*
[INPUT]:  Mock config and candidate servers with controlled latency
[OUTPUT]: Test results for the endpoint selection procedure
[POS]:    Integration tests - domain selector
[UPDATE]: When selection policy changes
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    CONFIG_PATH, mount_domain_config, mount_probe, setup_mock_server, unreachable_url,
};
use panda_account_adapter::{
    DomainSelector, PandaError, PersistedState, SelectedDomain, StateStore,
};
use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn selector_for(config_server: &MockServer, dir: &TempDir) -> DomainSelector {
    let config_url = Url::parse(&format!("{}{}", config_server.uri(), CONFIG_PATH)).unwrap();
    DomainSelector::new(config_url, Arc::new(StateStore::new(dir.path()))).unwrap()
}

fn seed_endpoint(dir: &TempDir, name: &str, url: &str) {
    StateStore::new(dir.path())
        .save(&PersistedState {
            tokens: None,
            endpoint: Some(SelectedDomain {
                name: name.to_string(),
                url: url.to_string(),
            }),
        })
        .unwrap();
}

async fn mount_slow_probe(server: &MockServer, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(common::PROBE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success"}))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_select_best_picks_lowest_latency() {
    let slow = setup_mock_server().await;
    let fast = setup_mock_server().await;
    mount_slow_probe(&slow, Duration::from_millis(500)).await;
    mount_probe(&fast).await;

    let config = setup_mock_server().await;
    mount_domain_config(
        &config,
        json!([
            {"name": "slow", "url": slow.uri()},
            {"name": "fast", "url": fast.uri()},
        ]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(false).await.unwrap();
    assert_eq!(selected.name, "fast");
    assert_eq!(selected.url, fast.uri());
    assert_eq!(selector.current_name().unwrap(), Some("fast".to_string()));
}

#[tokio::test]
async fn test_unreachable_candidate_is_skipped() {
    let reachable = setup_mock_server().await;
    mount_probe(&reachable).await;

    let config = setup_mock_server().await;
    mount_domain_config(
        &config,
        json!([
            {"name": "dead", "url": unreachable_url()},
            {"name": "alive", "url": reachable.uri()},
        ]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(false).await.unwrap();
    assert_eq!(selected.name, "alive");
}

#[tokio::test]
async fn test_all_unreachable_falls_back_to_first_listed() {
    let config = setup_mock_server().await;
    mount_domain_config(
        &config,
        json!([
            {"name": "first", "url": unreachable_url()},
            {"name": "second", "url": unreachable_url()},
        ]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(false).await.unwrap();
    assert_eq!(selected.name, "first");
}

#[tokio::test]
async fn test_cached_reachable_endpoint_skips_config_fetch() {
    let api = setup_mock_server().await;
    mount_probe(&api).await;

    let config = setup_mock_server().await;
    // A fast-path hit must not touch the config endpoint at all
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&config)
        .await;

    let dir = TempDir::new().unwrap();
    seed_endpoint(&dir, "cached", &api.uri());
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(false).await.unwrap();
    assert_eq!(selected.name, "cached");
    assert_eq!(selected.url, api.uri());
}

#[tokio::test]
async fn test_cached_unreachable_endpoint_triggers_reselection() {
    let replacement = setup_mock_server().await;
    mount_probe(&replacement).await;

    let config = setup_mock_server().await;
    mount_domain_config(
        &config,
        json!([{"name": "replacement", "url": replacement.uri()}]),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let dead = unreachable_url();
    seed_endpoint(&dir, "stale", &dead);
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(false).await.unwrap();
    assert_eq!(selected.name, "replacement");
    assert_ne!(selected.url, dead);
}

#[tokio::test]
async fn test_force_ignores_cached_endpoint() {
    let api = setup_mock_server().await;
    mount_probe(&api).await;

    let config = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "forced", "url": api.uri()}])),
        )
        .expect(1)
        .mount(&config)
        .await;

    let dir = TempDir::new().unwrap();
    seed_endpoint(&dir, "cached", &api.uri());
    let selector = selector_for(&config, &dir);

    let selected = selector.select_best(true).await.unwrap();
    assert_eq!(selected.name, "forced");
}

#[tokio::test]
async fn test_empty_config_is_a_hard_error() {
    let config = setup_mock_server().await;
    mount_domain_config(&config, json!([])).await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    let err = selector.select_best(false).await.unwrap_err();
    assert!(matches!(err, PandaError::EmptyConfig));
}

#[tokio::test]
async fn test_malformed_config_is_a_fetch_error() {
    let config = setup_mock_server().await;
    mount_domain_config(&config, json!({"not": "a list"})).await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    let err = selector.select_best(false).await.unwrap_err();
    assert!(matches!(err, PandaError::ConfigFetch(_)));
}

#[tokio::test]
async fn test_base_url_is_resolved_once() {
    let api = setup_mock_server().await;
    mount_probe(&api).await;

    let config = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path(CONFIG_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "only", "url": api.uri()}])),
        )
        .expect(1)
        .mount(&config)
        .await;

    let dir = TempDir::new().unwrap();
    let selector = selector_for(&config, &dir);

    // Concurrent first callers must share one resolution
    let (first, second) = tokio::join!(selector.base_url(), selector.base_url());
    assert_eq!(first.unwrap(), second.unwrap());

    let third = selector.base_url().await.unwrap();
    assert_eq!(third.url, api.uri());
}

#[tokio::test]
async fn test_switch_replaces_memo_and_emits_event() {
    let api = setup_mock_server().await;
    mount_probe(&api).await;

    let config = setup_mock_server().await;
    mount_domain_config(&config, json!([{"name": "switched", "url": api.uri()}])).await;

    let dir = TempDir::new().unwrap();
    seed_endpoint(&dir, "original", &api.uri());
    let selector = selector_for(&config, &dir);

    let resolved = selector.base_url().await.unwrap();
    assert_eq!(resolved.name, "original");

    let mut events = selector.subscribe();
    let switched = selector.switch().await.unwrap();
    assert_eq!(switched.name, "switched");

    let change = tokio::time::timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event within 1s")
        .expect("channel open");
    assert_eq!(change.name, "switched");
    assert_eq!(change.url, api.uri());

    // The memo now reflects the switched endpoint
    let resolved = selector.base_url().await.unwrap();
    assert_eq!(resolved.name, "switched");
}
