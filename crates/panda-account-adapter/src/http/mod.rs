/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod auth;
pub mod client;
pub mod error;
pub mod user;

pub use auth::{LOGIN_PATH, REGISTER_PATH};
pub use client::{ClientConfig, PandaClient};
pub use error::{PandaError, Result};
