/*
[INPUT]:  Remote candidate configuration and health probes
[OUTPUT]: Selected API base URL with change notifications
[POS]:    Domain layer - endpoint selection
[UPDATE]: When selection policy or notification mechanism changes
*/

pub mod selector;

pub use selector::{DOMAIN_CONFIG_URL, DomainChange, DomainSelector, PROBE_PATH};
