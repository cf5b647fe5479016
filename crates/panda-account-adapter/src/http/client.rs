/*
[INPUT]:  HTTP configuration, persisted session state, selected endpoint
[OUTPUT]: Process-scoped client with a lazily built shared reqwest instance
[POS]:    HTTP layer - session state and client construction
[UPDATE]: When connection options or invalidation triggers change
*/

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, broadcast};
use tracing::debug;

use crate::auth::TokenStore;
use crate::domain::{DOMAIN_CONFIG_URL, DomainChange, DomainSelector};
use crate::http::{PandaError, Result};
use crate::storage::StateStore;
use crate::types::{ApiResponse, SelectedDomain};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// The shared handle: a reqwest client bound to the selected endpoint and
/// carrying the stored bearer token as a default header
#[derive(Debug, Clone)]
pub(crate) struct SharedClient {
    pub http: reqwest::Client,
    pub base_url: Url,
}

/// Process-scoped session object for the panel API. Owns the persisted
/// state, the credential pair, the domain selector, and the single-flight
/// slot for the shared HTTP client. The slot is cleared on every credential
/// change (login, signup, logout) and on endpoint switch, so the handle
/// never reflects stale state.
#[derive(Debug)]
pub struct PandaClient {
    config: ClientConfig,
    tokens: TokenStore,
    selector: DomainSelector,
    shared: Mutex<Option<SharedClient>>,
}

impl PandaClient {
    /// Create a client with default configuration and state location
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_urls(config, DOMAIN_CONFIG_URL, StateStore::default_dir())
    }

    /// Create a client with an explicit config URL and state directory
    pub fn with_config_and_urls(
        config: ClientConfig,
        config_url: &str,
        state_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let store = Arc::new(StateStore::new(state_dir));
        let selector = DomainSelector::new(Url::parse(config_url)?, Arc::clone(&store))?;
        Ok(Self {
            config,
            tokens: TokenStore::new(store),
            selector,
            shared: Mutex::new(None),
        })
    }

    /// Credential pair store
    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    /// Endpoint selector
    pub fn domain_selector(&self) -> &DomainSelector {
        &self.selector
    }

    /// Register for forced endpoint-switch notifications
    pub fn subscribe_domain_changes(&self) -> broadcast::Receiver<DomainChange> {
        self.selector.subscribe()
    }

    /// Display name of the selected endpoint, if any
    pub fn current_domain_name(&self) -> Result<Option<String>> {
        self.selector.current_name()
    }

    /// Force endpoint re-selection and drop the shared client so the next
    /// request is built against the new base URL
    pub async fn switch_domain(&self) -> Result<SelectedDomain> {
        let domain = self.selector.switch().await?;
        self.invalidate_client().await;
        Ok(domain)
    }

    /// Get the shared client, building it on first use. The slot lock is
    /// held across resolution and construction, so concurrent first callers
    /// share one build instead of racing.
    pub(crate) async fn shared_client(&self) -> Result<SharedClient> {
        let mut slot = self.shared.lock().await;
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let domain = self.selector.base_url().await?;
        let base_url = Url::parse(&domain.url)?;

        let mut headers = HeaderMap::new();
        if let Some(bearer) = self.tokens.bearer_token()? {
            let value = HeaderValue::from_str(&bearer)
                .map_err(|err| PandaError::InvalidCredential(err.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .default_headers(headers)
            .build()?;

        let client = SharedClient { http, base_url };
        *slot = Some(client.clone());
        debug!(base_url = %domain.url, "constructed shared HTTP client");
        Ok(client)
    }

    /// Drop the cached shared client
    pub(crate) async fn invalidate_client(&self) {
        *self.shared.lock().await = None;
    }

    /// Build a request against the selected endpoint. Concatenate rather
    /// than join; a candidate base URL may carry a path prefix.
    pub(crate) async fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let client = self.shared_client().await?;
        let url = format!(
            "{}{}",
            client.base_url.as_str().trim_end_matches('/'),
            endpoint
        );
        Ok(client.http.request(method, Url::parse(&url)?))
    }

    /// Send a request and unwrap the `{status, message, data}` envelope
    pub(crate) async fn send_enveloped<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PandaError::api_error(status, error_message(response).await));
        }
        let envelope: ApiResponse<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Send a request and decode the body directly (no envelope)
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PandaError::api_error(status, error_message(response).await));
        }
        Ok(response.json().await?)
    }
}

/// Best-effort message extraction from an error body: prefer the envelope
/// message, fall back to the raw body, then the status line.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
        return envelope.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}
