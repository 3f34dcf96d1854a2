//! Core types for the connection registry

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::{Category, Settings};

/// A connection declared by a config source.
///
/// The definition's `values` are applied on top of the `clone` template (if
/// any) when the connection is materialized into the config store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDefinition {
    /// Connection name (e.g., "mysqlro1")
    pub name: String,
    /// Concrete connection to use as a template
    #[serde(default)]
    pub clone: Option<String>,
    /// Settings that override the template's
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl ConnectionDefinition {
    /// Create a definition with no template and no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clone: None,
            values: BTreeMap::new(),
        }
    }

    /// Set the template to clone from (builder pattern).
    pub fn with_clone(mut self, template: impl Into<String>) -> Self {
        self.clone = Some(template.into());
        self
    }

    /// Add a setting (builder pattern).
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// The definition's values as config-store settings.
    pub fn settings(&self) -> Settings {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect()
    }
}

/// A named pool of connections, one of which is picked at random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    members: Vec<String>,
}

impl Group {
    /// Create a group, rejecting an empty member list.
    pub fn new(category: Category, name: &str, members: Vec<String>) -> Result<Self> {
        let group = Self { members };
        group.validate(category, name)?;
        Ok(group)
    }

    /// Group members, in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Pick a member uniformly at random.
    pub fn pick(&self) -> Option<&str> {
        use rand::Rng;

        if self.members.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.members.len());
        Some(self.members[index].as_str())
    }

    pub(crate) fn validate(&self, category: Category, name: &str) -> Result<()> {
        if self.members.is_empty() {
            return Err(Error::EmptyGroup {
                category,
                group: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Rules used when a requested connection has no definition of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallbacks {
    /// `name -> target`: resolve the target instead
    #[serde(default)]
    pub reuse: BTreeMap<Category, BTreeMap<String, String>>,
    /// `name -> template`: clone the resolved template under `name`
    #[serde(default)]
    pub clone: BTreeMap<Category, BTreeMap<String, String>>,
}

impl Fallbacks {
    /// Whether no fallback rules are declared.
    pub fn is_empty(&self) -> bool {
        self.reuse.values().all(BTreeMap::is_empty) && self.clone.values().all(BTreeMap::is_empty)
    }

    /// Add another set of rules, replacing any with the same name.
    pub fn merge(&mut self, other: &Fallbacks) {
        for (category, rules) in &other.reuse {
            self.reuse
                .entry(*category)
                .or_default()
                .extend(rules.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for (category, rules) in &other.clone {
            self.clone
                .entry(*category)
                .or_default()
                .extend(rules.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
}
