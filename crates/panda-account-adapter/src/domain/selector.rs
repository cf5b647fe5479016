/*
[INPUT]:  Remote candidate list and per-candidate health probes
[OUTPUT]: Selected API base URL with caching and change notifications
[POS]:    Domain layer - latency-based endpoint selection
[UPDATE]: When the config source, probe path, or selection policy changes
*/

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{PandaError, Result};
use crate::storage::StateStore;
use crate::types::{DomainCandidate, SelectedDomain};

/// Remote configuration listing candidate API base URLs
pub const DOMAIN_CONFIG_URL: &str = "https://oss01.980410.xyz/pandaoss.conf.json";

/// Guest endpoint probed to judge reachability; any 2xx counts as healthy
pub const PROBE_PATH: &str = "/globalize/v1/guest/comm/config";

const CONFIG_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Broadcast on every forced endpoint switch
#[derive(Debug, Clone, PartialEq)]
pub struct DomainChange {
    pub name: String,
    pub url: String,
}

/// Chooses the fastest-reachable API endpoint from a remote-configured
/// candidate list. The choice is persisted in the state store; within a
/// process, `base_url` memoizes the resolution behind a single-flight slot.
#[derive(Debug)]
pub struct DomainSelector {
    http: reqwest::Client,
    config_url: Url,
    store: Arc<StateStore>,
    resolved: Mutex<Option<SelectedDomain>>,
    events: broadcast::Sender<DomainChange>,
}

impl DomainSelector {
    pub fn new(config_url: Url, store: Arc<StateStore>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        let (events, _) = broadcast::channel(16);
        Ok(Self {
            http,
            config_url,
            store,
            resolved: Mutex::new(None),
            events,
        })
    }

    /// Register for forced-switch notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DomainChange> {
        self.events.subscribe()
    }

    /// Fetch the candidate list from the remote configuration URL
    pub async fn fetch_candidates(&self) -> Result<Vec<DomainCandidate>> {
        let response = self
            .http
            .get(self.config_url.clone())
            .timeout(CONFIG_TIMEOUT)
            .send()
            .await
            .map_err(|err| PandaError::ConfigFetch(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PandaError::ConfigFetch(format!(
                "config request returned {status}"
            )));
        }

        response
            .json::<Vec<DomainCandidate>>()
            .await
            .map_err(|err| PandaError::ConfigFetch(format!("invalid config format: {err}")))
    }

    /// Probe a candidate's health endpoint. Returns the elapsed latency in
    /// milliseconds on any 2xx, `None` on timeout, connect error, or error
    /// status. Probe failures are never surfaced to callers.
    pub async fn probe(&self, base_url: &str) -> Option<u128> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), PROBE_PATH);
        let started = Instant::now();

        match self.http.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => {
                Some(started.elapsed().as_millis())
            }
            Ok(response) => {
                debug!(%url, status = %response.status(), "probe rejected");
                None
            }
            Err(err) => {
                debug!(%url, error = %err, "probe failed");
                None
            }
        }
    }

    /// Selection procedure:
    /// 1. Unless forced, return the cached endpoint if it still answers a probe.
    /// 2. Fetch the candidate list; an empty list is a hard error.
    /// 3. Probe all candidates concurrently and take the lowest latency,
    ///    ties broken by list order. If nothing answers, degrade to the
    ///    first-listed candidate rather than failing.
    /// 4. Persist and return the winner.
    pub async fn select_best(&self, force: bool) -> Result<SelectedDomain> {
        if !force {
            if let Some(cached) = self.store.load()?.endpoint {
                if self.probe(&cached.url).await.is_some() {
                    debug!(url = %cached.url, "cached endpoint reachable");
                    return Ok(cached);
                }
                warn!(url = %cached.url, "cached endpoint unreachable, re-selecting");
            }
        }

        let candidates = self.fetch_candidates().await?;
        if candidates.is_empty() {
            return Err(PandaError::EmptyConfig);
        }

        let latencies = join_all(candidates.iter().map(|c| self.probe(&c.url))).await;
        let winner = pick_fastest(&latencies).unwrap_or_else(|| {
            warn!("no candidate answered a probe, falling back to first listed");
            0
        });

        let chosen = SelectedDomain {
            name: candidates[winner].name.clone(),
            url: candidates[winner].url.clone(),
        };
        self.store.update(|state| state.endpoint = Some(chosen.clone()))?;
        info!(name = %chosen.name, url = %chosen.url, "selected API endpoint");
        Ok(chosen)
    }

    /// Currently selected endpoint, resolving it on first call. The slot is
    /// locked across the resolution so concurrent callers share one attempt;
    /// only successful resolutions are memoized.
    pub async fn base_url(&self) -> Result<SelectedDomain> {
        let mut slot = self.resolved.lock().await;
        if let Some(domain) = slot.as_ref() {
            return Ok(domain.clone());
        }
        let domain = self.select_best(false).await?;
        *slot = Some(domain.clone());
        Ok(domain)
    }

    /// Force re-selection, replace the memoized result, and notify listeners.
    /// Used as the failover path when the current endpoint stops responding.
    pub async fn switch(&self) -> Result<SelectedDomain> {
        let mut slot = self.resolved.lock().await;
        let domain = self.select_best(true).await?;
        *slot = Some(domain.clone());
        let _ = self.events.send(DomainChange {
            name: domain.name.clone(),
            url: domain.url.clone(),
        });
        Ok(domain)
    }

    /// Display name of the persisted endpoint, if one was ever selected
    pub fn current_name(&self) -> Result<Option<String>> {
        Ok(self.store.load()?.endpoint.map(|endpoint| endpoint.name))
    }
}

/// Index of the lowest latency; `None` entries are unreachable and skipped.
/// Strict comparison keeps the earliest-listed candidate on a tie.
fn pick_fastest(latencies: &[Option<u128>]) -> Option<usize> {
    let mut best: Option<(usize, u128)> = None;
    for (index, latency) in latencies.iter().enumerate() {
        if let Some(ms) = latency {
            if best.is_none_or(|(_, fastest)| *ms < fastest) {
                best = Some((index, *ms));
            }
        }
    }
    best.map(|(index, _)| index)
}
