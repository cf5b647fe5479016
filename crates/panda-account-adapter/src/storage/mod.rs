/*
[INPUT]:  Persisted session state (credential pair, selected endpoint)
[OUTPUT]: Durable JSON-backed state file surviving process restarts
[POS]:    Storage layer - single source of truth for cached client state
[UPDATE]: When the persisted state schema or file location changes
*/

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::Result;
use crate::types::SelectedDomain;

/// File name of the persisted state document
pub const STATE_FILE: &str = "panda-state.json";

/// Credential pair with explicit expiry. Both tokens are stored together
/// and cleared together; an expired record reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub token: String,
    pub bearer: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredTokens {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Everything the adapter persists between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub tokens: Option<StoredTokens>,
    #[serde(default)]
    pub endpoint: Option<SelectedDomain>,
}

/// JSON file-backed store for [`PersistedState`]
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STATE_FILE),
        }
    }

    /// Default state directory: `<config dir>/panda-account`
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("panda-account")
    }

    /// Load the persisted state; a missing file reads as the default state
    pub fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Atomically replace the persisted state (write-to-temp then rename)
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(state)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&tmp_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms)?;
        }

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Load, mutate, and save in one step
    pub fn update(&self, mutate: impl FnOnce(&mut PersistedState)) -> Result<PersistedState> {
        let mut state = self.load()?;
        mutate(&mut state);
        self.save(&state)?;
        Ok(state)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
