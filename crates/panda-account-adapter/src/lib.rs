/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public panda account adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod domain;
pub mod http;
pub mod storage;
pub mod types;

// Re-export commonly used types from auth
pub use auth::TokenStore;

// Re-export commonly used types from domain
pub use domain::{
    DOMAIN_CONFIG_URL,
    DomainChange,
    DomainSelector,
    PROBE_PATH,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    PandaClient,
    PandaError,
    Result,
};

// Re-export storage state types
pub use storage::{PersistedState, StateStore, StoredTokens};

// Re-export all types
pub use types::*;
