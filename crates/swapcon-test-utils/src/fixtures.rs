//! Seeded config stores and registries.

use serde_json::{Value, json};
use swapcon_core::{Category, ConfigStore, ConnectionDefinition, MemoryStore, Registry, Settings};

/// Turn a JSON object literal into connection settings.
///
/// Panics if `value` isn't an object.
pub fn settings(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        other => panic!("settings fixture must be an object, got {other}"),
    }
}

/// A store with one concrete connection, `test1 = { "a": "b" }`, in every
/// category, and `default` pointing at it.
pub fn store_with_template() -> MemoryStore {
    let mut store = MemoryStore::new();
    for category in Category::ALL {
        store.set(&category.connection_path("test1"), json!({ "a": "b" }));
        store.set(&category.default_path(), json!("test1"));
    }
    store
}

/// The registry used throughout the resolution tests, for `category`:
///
/// - definitions `con1` (clone of `test1`, `myval = con1`) and `con2`
///   (no template, `myval = con2`)
/// - group `con` = `[con1, con2]`
/// - reuse fallbacks `con1`, `con3` -> `test1`
/// - clone fallbacks `con2`, `con4` -> `test1`
pub fn sample_registry(category: Category) -> Registry {
    let mut registry = Registry::new();
    registry.add_definition(
        category,
        ConnectionDefinition::new("con1")
            .with_clone("test1")
            .with_value("myval", "con1"),
    );
    registry.add_definition(
        category,
        ConnectionDefinition::new("con2").with_value("myval", "con2"),
    );
    registry
        .add_group(category, "con", vec!["con1".into(), "con2".into()])
        .expect("fixture group has members");
    registry.add_reuse(category, "con1", "test1");
    registry.add_reuse(category, "con3", "test1");
    registry.add_clone(category, "con2", "test1");
    registry.add_clone(category, "con4", "test1");
    registry
}
