/*
[INPUT]:  Email/password credentials and signup fields
[OUTPUT]: Persisted credential pair and authenticated session
[POS]:    HTTP layer - passport endpoints with one-shot endpoint failover
[UPDATE]: When auth endpoints or the failover policy change
*/

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::http::{PandaClient, Result};
use crate::types::{LoginData, LoginRequest, SignupRequest};

pub const LOGIN_PATH: &str = "/globalize/v1/passport/auth/login";
pub const REGISTER_PATH: &str = "/globalize/v1/passport/auth/register";

impl PandaClient {
    /// Log in with email and password
    ///
    /// POST /globalize/v1/passport/auth/login
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginData> {
        self.authenticate(LOGIN_PATH, payload).await
    }

    /// Register a new account
    ///
    /// POST /globalize/v1/passport/auth/register
    pub async fn signup(&self, payload: &SignupRequest) -> Result<LoginData> {
        self.authenticate(REGISTER_PATH, payload).await
    }

    /// Clear the credential pair and drop the shared client; no network call
    pub async fn logout(&self) -> Result<()> {
        self.token_store().clear()?;
        self.invalidate_client().await;
        debug!("cleared credentials");
        Ok(())
    }

    /// Short session token, if logged in
    pub fn short_token(&self) -> Result<Option<String>> {
        self.token_store().short_token()
    }

    /// Bearer credential, if logged in
    pub fn bearer_token(&self) -> Result<Option<String>> {
        self.token_store().bearer_token()
    }

    /// Shared login/signup flow. A connection-level failure (no HTTP response
    /// received) forces endpoint re-selection and retries the same request
    /// exactly once; any second failure, and every server-returned error,
    /// propagates unmodified.
    async fn authenticate<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> Result<LoginData> {
        match self.post_credentials(endpoint, payload).await {
            Ok(data) => {
                self.store_login(&data).await?;
                Ok(data)
            }
            Err(err) if err.is_connection_failure() => {
                warn!(%endpoint, error = %err, "no response from endpoint, switching and retrying once");
                self.switch_domain().await?;
                let data = self.post_credentials(endpoint, payload).await?;
                self.store_login(&data).await?;
                Ok(data)
            }
            Err(err) => Err(err),
        }
    }

    async fn post_credentials<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> Result<LoginData> {
        let builder = self.request(Method::POST, endpoint).await?.json(payload);
        self.send_enveloped(builder).await
    }

    /// Persist the returned pair and drop the shared client so the next
    /// request picks up the new Authorization header
    async fn store_login(&self, data: &LoginData) -> Result<()> {
        self.token_store().save(&data.token, &data.auth_data)?;
        self.invalidate_client().await;
        Ok(())
    }
}
