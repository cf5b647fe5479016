/*
[INPUT]:  Credential pair from login/signup
[OUTPUT]: Persistent token storage and retrieval
[POS]:    Auth layer - credential lifecycle
[UPDATE]: When token storage strategy changes
*/

pub mod tokens;

pub use tokens::TokenStore;
