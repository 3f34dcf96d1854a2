//! Registry storage

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ConnectionDefinition, Fallbacks, Group};
use crate::error::Result;
use crate::{Category, ConfigStore};

/// Everything declared about connections that aren't (yet) concrete.
///
/// Holds the connection definitions, groups and fallback rules for every
/// category. The serialized shape is
/// `{ "groups": {..}, "connections": {..}, "fallbacks": { "reuse": {..}, "clone": {..} } }`,
/// keyed by category then by name, so a registry can live in a config store
/// alongside the application's own settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    groups: BTreeMap<Category, BTreeMap<String, Group>>,
    #[serde(default)]
    connections: BTreeMap<Category, BTreeMap<String, ConnectionDefinition>>,
    #[serde(default)]
    fallbacks: Fallbacks,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry kept in a config store under `key`.
    ///
    /// A missing key yields an empty registry. Groups are validated, so a
    /// hand-written empty group is reported the same way as one read from
    /// an env file.
    pub fn from_store(store: &dyn ConfigStore, key: &str) -> Result<Self> {
        let Some(value) = store.get(key) else {
            tracing::debug!(key, "No registry in config store");
            return Ok(Self::new());
        };
        let registry: Registry = serde_json::from_value(value)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Serialize the registry for storing in a config store.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Check every group has at least one member.
    pub fn validate(&self) -> Result<()> {
        for (category, groups) in &self.groups {
            for (name, group) in groups {
                group.validate(*category, name)?;
            }
        }
        Ok(())
    }

    /// Register a connection definition, replacing one with the same name.
    pub fn add_definition(&mut self, category: Category, definition: ConnectionDefinition) {
        self.connections
            .entry(category)
            .or_default()
            .insert(definition.name.clone(), definition);
    }

    /// Register a group.
    pub fn add_group(
        &mut self,
        category: Category,
        name: impl Into<String>,
        members: Vec<String>,
    ) -> Result<()> {
        let name = name.into();
        let group = Group::new(category, &name, members)?;
        self.groups.entry(category).or_default().insert(name, group);
        Ok(())
    }

    /// Register a reuse fallback: `name` resolves as `target`.
    pub fn add_reuse(&mut self, category: Category, name: impl Into<String>, target: impl Into<String>) {
        self.fallbacks
            .reuse
            .entry(category)
            .or_default()
            .insert(name.into(), target.into());
    }

    /// Register a clone fallback: `name` becomes a copy of `template`.
    pub fn add_clone(
        &mut self,
        category: Category,
        name: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.fallbacks
            .clone
            .entry(category)
            .or_default()
            .insert(name.into(), template.into());
    }

    /// Get a definition by name.
    pub fn definition(&self, category: Category, name: &str) -> Option<&ConnectionDefinition> {
        self.connections.get(&category)?.get(name)
    }

    /// Get a group by name.
    pub fn group(&self, category: Category, name: &str) -> Option<&Group> {
        self.groups.get(&category)?.get(name)
    }

    /// The connection a reuse fallback points at.
    pub fn reuse_target(&self, category: Category, name: &str) -> Option<&str> {
        self.fallbacks.reuse.get(&category)?.get(name).map(String::as_str)
    }

    /// The template a clone fallback copies from.
    pub fn clone_template(&self, category: Category, name: &str) -> Option<&str> {
        self.fallbacks.clone.get(&category)?.get(name).map(String::as_str)
    }

    /// Iterate over all definitions, ordered by category then name.
    pub fn definitions(&self) -> impl Iterator<Item = (Category, &ConnectionDefinition)> {
        self.connections
            .iter()
            .flat_map(|(category, defs)| defs.values().map(move |def| (*category, def)))
    }

    /// Iterate over all groups, ordered by category then name.
    pub fn groups(&self) -> impl Iterator<Item = (Category, &str, &Group)> {
        self.groups.iter().flat_map(|(category, groups)| {
            groups
                .iter()
                .map(move |(name, group)| (*category, name.as_str(), group))
        })
    }

    /// The fallback rules.
    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    /// Merge another registry into this one. Entries in `other` replace
    /// entries with the same category and name.
    pub fn merge(&mut self, other: &Registry) {
        for (category, groups) in &other.groups {
            self.groups
                .entry(*category)
                .or_default()
                .extend(groups.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for (category, defs) in &other.connections {
            self.connections
                .entry(*category)
                .or_default()
                .extend(defs.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        self.fallbacks.merge(&other.fallbacks);
    }

    /// Number of definitions across all categories.
    pub fn definition_count(&self) -> usize {
        self.connections.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing at all is declared.
    pub fn is_empty(&self) -> bool {
        self.definition_count() == 0
            && self.groups.values().all(BTreeMap::is_empty)
            && self.fallbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.add_definition(
            Category::Database,
            ConnectionDefinition::new("con1")
                .with_clone("test1")
                .with_value("myval", "con1"),
        );
        registry.add_definition(
            Category::Database,
            ConnectionDefinition::new("con2").with_value("myval", "con2"),
        );
        registry
            .add_group(Category::Database, "con", vec!["con1".into(), "con2".into()])
            .unwrap();
        registry.add_reuse(Category::Database, "con3", "test1");
        registry.add_clone(Category::Database, "con4", "test1");
        registry
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.definition_count(), 0);
    }

    #[test]
    fn test_lookups() {
        let registry = sample();

        assert!(!registry.is_empty());
        assert_eq!(registry.definition_count(), 2);
        assert_eq!(
            registry.definition(Category::Database, "con1").unwrap().clone.as_deref(),
            Some("test1")
        );
        assert!(registry.definition(Category::Cache, "con1").is_none());
        assert_eq!(
            registry.group(Category::Database, "con").unwrap().members(),
            ["con1", "con2"]
        );
        assert_eq!(registry.reuse_target(Category::Database, "con3"), Some("test1"));
        assert_eq!(registry.clone_template(Category::Database, "con4"), Some("test1"));
        assert_eq!(registry.reuse_target(Category::Database, "con4"), None);
    }

    #[test]
    fn test_definitions_are_ordered() {
        let mut registry = sample();
        registry.add_definition(Category::Cache, ConnectionDefinition::new("zz"));
        registry.add_definition(Category::Broadcasting, ConnectionDefinition::new("aa"));

        let order: Vec<_> = registry
            .definitions()
            .map(|(c, d)| format!("{c}.{}", d.name))
            .collect();
        assert_eq!(
            order,
            vec!["broadcasting.aa", "cache.zz", "database.con1", "database.con2"]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let value = sample().to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "groups": { "database": { "con": ["con1", "con2"] } },
                "connections": { "database": {
                    "con1": { "name": "con1", "clone": "test1", "values": { "myval": "con1" } },
                    "con2": { "name": "con2", "clone": null, "values": { "myval": "con2" } }
                } },
                "fallbacks": {
                    "reuse": { "database": { "con3": "test1" } },
                    "clone": { "database": { "con4": "test1" } }
                }
            })
        );
    }

    #[test]
    fn test_from_store_round_trips() {
        let registry = sample();
        let mut store = MemoryStore::new();
        store.set("swapcon", registry.to_value().unwrap());

        assert_eq!(Registry::from_store(&store, "swapcon").unwrap(), registry);
        assert!(Registry::from_store(&store, "missing").unwrap().is_empty());
    }

    #[test]
    fn test_from_store_rejects_empty_group() {
        let store = MemoryStore::from_value(json!({
            "swapcon": { "groups": { "cache": { "redis": [] } } }
        }));

        let err = Registry::from_store(&store, "swapcon").unwrap_err();
        assert!(matches!(err, Error::EmptyGroup { .. }));
    }

    #[test]
    fn test_merge_replaces_same_names() {
        let mut base = sample();
        let mut overlay = Registry::new();
        overlay.add_definition(
            Category::Database,
            ConnectionDefinition::new("con2").with_value("myval", "replaced"),
        );
        overlay.add_reuse(Category::Cache, "tenant", "redis");

        base.merge(&overlay);

        assert_eq!(
            base.definition(Category::Database, "con2").unwrap().values["myval"],
            "replaced"
        );
        assert!(base.definition(Category::Database, "con1").is_some());
        assert_eq!(base.reuse_target(Category::Cache, "tenant"), Some("redis"));
    }
}
