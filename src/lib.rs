//! cloudrecon
//!
//! Concurrent discovery of cloud accounts and resources behind a pluggable
//! provider contract, with TTL caching, retries and cancellation.

pub mod discovery;
pub mod providers;
pub mod server;
pub mod settings;
pub mod telemetry;

pub use discovery::{
    DiscoveryConfig, DiscoveryContext, DiscoveryEngine, DiscoveryOptions, DiscoveryResult, Discoverer,
    Provider,
};
pub use settings::Settings;
