//! Resource and Account Filtering
//!
//! Two filter styles are supported:
//!
//! - **Filter sets**: typed predicates combined with AND across filters and OR
//!   within a list-valued filter. Used by the single-provider discoverer and as
//!   a post-filter in the engine.
//! - **Rules**: ordered include/exclude selectors for the multi-provider
//!   engine. The first matching rule decides, default is include.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::ConfigError;
use super::types::{Account, Resource};

/// A single predicate over a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceFilter {
    LabelEquals { key: String, value: String },
    StatusIn { statuses: Vec<String> },
    NetworkIn { networks: Vec<String> },
    CreatedAfter { at: DateTime<Utc> },
    CreatedBefore { at: DateTime<Utc> },
}

impl ResourceFilter {
    pub fn label(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::LabelEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn status_in<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::StatusIn {
            statuses: statuses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn network_in<I, S>(networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NetworkIn {
            networks: networks.into_iter().map(Into::into).collect(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ResourceFilter::LabelEquals { .. } => "label_equals",
            ResourceFilter::StatusIn { .. } => "status_in",
            ResourceFilter::NetworkIn { .. } => "network_in",
            ResourceFilter::CreatedAfter { .. } => "created_after",
            ResourceFilter::CreatedBefore { .. } => "created_before",
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ResourceFilter::LabelEquals { key, .. } if key.trim().is_empty() => {
                Err(ConfigError::BlankLabelKey)
            }
            ResourceFilter::StatusIn { statuses } if statuses.is_empty() => {
                Err(ConfigError::EmptyFilter { kind: self.kind() })
            }
            ResourceFilter::NetworkIn { networks } if networks.is_empty() => {
                Err(ConfigError::EmptyFilter { kind: self.kind() })
            }
            _ => Ok(()),
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            ResourceFilter::LabelEquals { key, value } => resource.tag(key) == Some(value.as_str()),
            ResourceFilter::StatusIn { statuses } => statuses.iter().any(|s| *s == resource.status),
            ResourceFilter::NetworkIn { networks } => resource
                .network
                .as_deref()
                .is_some_and(|network| networks.iter().any(|n| n == network)),
            ResourceFilter::CreatedAfter { at } => resource.created_at >= *at,
            ResourceFilter::CreatedBefore { at } => resource.created_at <= *at,
        }
    }
}

/// A validated conjunction of resource filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<ResourceFilter>,
}

impl FilterSet {
    pub fn new(filters: Vec<ResourceFilter>) -> Result<Self, ConfigError> {
        for filter in &filters {
            filter.validate()?;
        }

        let after = filters.iter().filter_map(|f| match f {
            ResourceFilter::CreatedAfter { at } => Some(*at),
            _ => None,
        });
        let before: Vec<DateTime<Utc>> = filters
            .iter()
            .filter_map(|f| match f {
                ResourceFilter::CreatedBefore { at } => Some(*at),
                _ => None,
            })
            .collect();

        for a in after {
            if let Some(b) = before.iter().find(|b| a > **b) {
                return Err(ConfigError::InvertedTimeRange {
                    after: a.to_rfc3339(),
                    before: b.to_rfc3339(),
                });
            }
        }

        Ok(Self { filters })
    }

    /// A set that includes every resource
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[ResourceFilter] {
        &self.filters
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        self.filters.iter().all(|f| f.matches(resource))
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let filters = Vec::<ResourceFilter>::deserialize(deserializer)?;
        FilterSet::new(filters).map_err(serde::de::Error::custom)
    }
}

/// Outcome of a matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Include,
    Exclude,
}

impl RuleAction {
    fn includes(self) -> bool {
        matches!(self, RuleAction::Include)
    }
}

/// Account selector. Unset fields match anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
    pub action: RuleAction,
}

impl AccountRule {
    pub fn matches(&self, account: &Account) -> bool {
        field_matches(&self.id, &account.id)
            && field_matches(&self.name, &account.name)
            && field_matches(&self.account_type, &account.account_type)
    }
}

/// Resource selector. Unset fields match anything; every listed tag must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRule {
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub action: RuleAction,
}

impl ResourceRule {
    pub fn matches(&self, resource: &Resource) -> bool {
        field_matches(&self.resource_type, &resource.resource_type)
            && field_matches(&self.region, &resource.region)
            && self
                .tags
                .iter()
                .all(|(key, value)| resource.tag(key) == Some(value.as_str()))
    }
}

fn field_matches(expected: &Option<String>, actual: &str) -> bool {
    match expected.as_deref() {
        None | Some("") => true,
        Some(expected) => expected == actual,
    }
}

pub fn should_include_account(rules: &[AccountRule], account: &Account) -> bool {
    rules
        .iter()
        .find(|rule| rule.matches(account))
        .map_or(true, |rule| rule.action.includes())
}

pub fn should_include_resource(rules: &[ResourceRule], resource: &Resource) -> bool {
    rules
        .iter()
        .find(|rule| rule.matches(resource))
        .map_or(true, |rule| rule.action.includes())
}
