//! Discovery error types

use thiserror::Error;

use super::types::DiscoveryResult;

/// Invalid discovery options, filters or rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: usize },

    #[error("filter {kind} requires at least one value")]
    EmptyFilter { kind: &'static str },

    #[error("label filter key must not be blank")]
    BlankLabelKey,

    #[error("created_after ({after}) is later than created_before ({before})")]
    InvertedTimeRange { after: String, before: String },

    #[error("invalid setting {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Run-aborting conditions. Everything else is recorded as a `DiscoveryError`.
#[derive(Debug, Error)]
pub enum DiscoveryRunError {
    #[error("no providers registered")]
    NoProviders { partial: Box<DiscoveryResult> },

    #[error("provider not found: {name}")]
    ProviderNotFound {
        name: String,
        partial: Box<DiscoveryResult>,
    },

    #[error("invalid discovery configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl DiscoveryRunError {
    /// The otherwise-empty result shape returned alongside structural errors
    pub fn partial(&self) -> Option<&DiscoveryResult> {
        match self {
            DiscoveryRunError::NoProviders { partial }
            | DiscoveryRunError::ProviderNotFound { partial, .. } => Some(partial),
            DiscoveryRunError::InvalidConfig(_) => None,
        }
    }

    pub fn into_partial(self) -> Option<DiscoveryResult> {
        match self {
            DiscoveryRunError::NoProviders { partial }
            | DiscoveryRunError::ProviderNotFound { partial, .. } => Some(*partial),
            DiscoveryRunError::InvalidConfig(_) => None,
        }
    }
}
