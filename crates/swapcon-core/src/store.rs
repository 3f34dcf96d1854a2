//! The configuration store SwapCon reads from and writes to
//!
//! SwapCon doesn't own the application's configuration. It talks to it through
//! [`ConfigStore`], a mapping from dotted key paths (`database.connections.mysql`)
//! to arbitrary values. [`MemoryStore`] is the in-process implementation used by
//! the CLI and the tests.

use serde_json::{Map, Value};

use crate::Result;

/// Read/write access to a configuration tree by dotted path.
pub trait ConfigStore {
    /// Get a copy of the value at `path`, if present.
    fn get(&self, path: &str) -> Option<Value>;

    /// Set the value at `path`, creating intermediate sections as needed.
    fn set(&mut self, path: &str, value: Value);

    /// Whether `path` holds a "truthy" value.
    ///
    /// Null, `false`, `""`, `"0"`, zero and empty arrays/objects all count as
    /// absent, which is how the connection sections of an application config
    /// are conventionally checked.
    fn has(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| is_truthy(&value))
    }
}

/// Truthiness of a config value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// An in-memory [`ConfigStore`] backed by a JSON value tree.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    root: Value,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Create a store from an existing tree. Non-object roots are replaced
    /// by an empty object.
    pub fn from_value(root: Value) -> Self {
        match root {
            Value::Object(_) => Self { root },
            _ => Self::new(),
        }
    }

    /// Parse a TOML document into a store.
    ///
    /// # Example
    ///
    /// ```
    /// use swapcon_core::{ConfigStore, MemoryStore};
    ///
    /// let store = MemoryStore::from_toml_str(r#"
    /// [database]
    /// default = "mysql"
    ///
    /// [database.connections.mysql]
    /// host = "127.0.0.1"
    /// "#).unwrap();
    ///
    /// assert!(store.has("database.connections.mysql"));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Ok(Self::from_value(serde_json::to_value(table)?))
    }

    /// Parse a JSON document into a store.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(content)?))
    }

    /// The whole tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consume the store, returning the tree.
    pub fn into_value(self) -> Value {
        self.root
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, path: &str) -> Option<Value> {
        let mut node = &self.root;
        for segment in path.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        Some(node.clone())
    }

    fn set(&mut self, path: &str, value: Value) {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut node = &mut self.root;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            node = as_section(node)
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        as_section(node).insert(leaf.to_string(), value);
    }
}

/// Treat `node` as a section, replacing it with an empty one if it's a scalar.
fn as_section(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_walks_dotted_path() {
        let store = MemoryStore::from_value(json!({
            "cache": { "stores": { "redis": { "host": "localhost" } } }
        }));

        assert_eq!(
            store.get("cache.stores.redis"),
            Some(json!({ "host": "localhost" }))
        );
        assert_eq!(store.get("cache.stores.redis.host"), Some(json!("localhost")));
        assert_eq!(store.get("cache.stores.memcached"), None);
        assert_eq!(store.get("cache.stores.redis.host.deeper"), None);
    }

    #[test]
    fn test_set_creates_intermediate_sections() {
        let mut store = MemoryStore::new();
        store.set("database.connections.mysql", json!({ "a": "b" }));
        store.set("database.default", json!("mysql"));

        assert_eq!(
            store.as_value(),
            &json!({
                "database": {
                    "default": "mysql",
                    "connections": { "mysql": { "a": "b" } }
                }
            })
        );
    }

    #[test]
    fn test_set_replaces_scalar_intermediates() {
        let mut store = MemoryStore::from_value(json!({ "queue": "sync" }));
        store.set("queue.default", json!("sqs"));
        assert_eq!(store.get("queue.default"), Some(json!("sqs")));
    }

    #[test]
    fn test_has_follows_truthiness() {
        let store = MemoryStore::from_value(json!({
            "a": null, "b": false, "c": "", "d": "0", "e": 0,
            "f": [], "g": {}, "h": { "x": 1 }, "i": "mysql", "j": true
        }));

        for falsy in ["a", "b", "c", "d", "e", "f", "g", "missing"] {
            assert!(!store.has(falsy), "{falsy} should be falsy");
        }
        for truthy in ["h", "i", "j"] {
            assert!(store.has(truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_from_toml_str() {
        let store = MemoryStore::from_toml_str(
            r#"
[database]
default = "mysql"

[database.connections.mysql]
host = "127.0.0.1"
port = 3306
"#,
        )
        .unwrap();

        assert_eq!(store.get("database.default"), Some(json!("mysql")));
        assert_eq!(
            store.get("database.connections.mysql.port"),
            Some(json!(3306))
        );
    }

    #[test]
    fn test_from_value_rejects_non_object_root() {
        let store = MemoryStore::from_value(json!(["not", "a", "map"]));
        assert_eq!(store.as_value(), &json!({}));
    }
}
