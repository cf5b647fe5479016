/*
[INPUT]:  Credential pair returned by login/signup
[OUTPUT]: Persistent token retrieval with expiry handling
[POS]:    Auth layer - credential lifecycle management
[UPDATE]: When the expiry policy or storage strategy changes
*/

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::http::Result;
use crate::storage::{StateStore, StoredTokens};

/// Credential lifetime, matching the original 30-day cookie expiry
const TOKEN_TTL_DAYS: i64 = 30;

/// Persistent store for the (short token, bearer token) credential pair.
/// Both tokens are saved together and cleared together; an expired pair
/// reads as absent for both fields.
#[derive(Debug, Clone)]
pub struct TokenStore {
    store: Arc<StateStore>,
}

impl TokenStore {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Persist a new credential pair with a fresh expiry
    pub fn save(&self, token: &str, bearer: &str) -> Result<()> {
        let tokens = StoredTokens {
            token: token.to_string(),
            bearer: bearer.to_string(),
            expires_at: Utc::now() + Duration::days(TOKEN_TTL_DAYS),
        };
        self.store.update(|state| state.tokens = Some(tokens))?;
        Ok(())
    }

    /// Current unexpired pair, if any
    pub fn current(&self) -> Result<Option<StoredTokens>> {
        let state = self.store.load()?;
        Ok(state.tokens.filter(|tokens| !tokens.is_expired()))
    }

    /// Short session token
    pub fn short_token(&self) -> Result<Option<String>> {
        Ok(self.current()?.map(|tokens| tokens.token))
    }

    /// Bearer credential for the Authorization header
    pub fn bearer_token(&self) -> Result<Option<String>> {
        Ok(self.current()?.map(|tokens| tokens.bearer))
    }

    /// Remove the credential pair
    pub fn clear(&self) -> Result<()> {
        self.store.update(|state| state.tokens = None)?;
        Ok(())
    }
}
