//! Building connection settings from a template and overrides

use serde_json::Value;

use crate::error::{Error, Result};
use crate::{Category, ConfigStore, Settings};

/// Build the settings for a new connection.
///
/// When both `category` and `clone_from` are given, the concrete connection
/// `<category>.<group-key>.<clone_from>` is used as a template and the
/// `overrides` are applied on top of it: override keys win, template-only keys
/// are kept. Otherwise the overrides are returned as they are.
///
/// # Errors
///
/// [`Error::TemplateNotFound`] when the template is missing or isn't a map.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use swapcon_core::{Category, ConfigStore, MemoryStore, Settings, builder};
///
/// let mut store = MemoryStore::new();
/// store.set("database.connections.mysql", json!({ "host": "db1", "port": "3306" }));
///
/// let mut overrides = Settings::new();
/// overrides.insert("host".into(), json!("db2"));
///
/// let built = builder::build(&store, overrides, Some(Category::Database), Some("mysql")).unwrap();
/// assert_eq!(built["host"], "db2");
/// assert_eq!(built["port"], "3306");
/// ```
pub fn build(
    store: &dyn ConfigStore,
    overrides: Settings,
    category: Option<Category>,
    clone_from: Option<&str>,
) -> Result<Settings> {
    let (Some(category), Some(clone_from)) = (category, clone_from) else {
        return Ok(overrides);
    };

    match store.get(&category.connection_path(clone_from)) {
        Some(Value::Object(mut template)) => {
            tracing::debug!(%category, template = clone_from, "Building connection from template");
            template.extend(overrides);
            Ok(template)
        }
        _ => Err(Error::TemplateNotFound {
            category,
            template: clone_from.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings(value: Value) -> Settings {
        value.as_object().cloned().unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::from_value(json!({
            "cache": {
                "stores": {
                    "redis": { "driver": "redis", "host": "127.0.0.1", "database": 0 },
                    "broken": "not-a-map"
                }
            }
        }))
    }

    #[test]
    fn test_overrides_win_and_template_keys_survive() {
        let built = build(
            &store(),
            settings(json!({ "host": "10.0.0.5", "prefix": "tenant" })),
            Some(Category::Cache),
            Some("redis"),
        )
        .unwrap();

        assert_eq!(
            Value::Object(built),
            json!({ "driver": "redis", "host": "10.0.0.5", "database": 0, "prefix": "tenant" })
        );
    }

    #[test]
    fn test_without_template_returns_overrides() {
        let overrides = settings(json!({ "a": "b" }));

        let built = build(&store(), overrides.clone(), Some(Category::Cache), None).unwrap();
        assert_eq!(built, overrides);

        let built = build(&store(), overrides.clone(), None, Some("redis")).unwrap();
        assert_eq!(built, overrides);
    }

    #[test]
    fn test_missing_template() {
        let err = build(&store(), Settings::new(), Some(Category::Cache), Some("memcached"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateNotFound { category: Category::Cache, ref template } if template == "memcached"
        ));
        assert_eq!(
            err.to_string(),
            "The cache connection to clone \"memcached\" was not found"
        );
    }

    #[test]
    fn test_template_must_be_a_map() {
        let err =
            build(&store(), Settings::new(), Some(Category::Cache), Some("broken")).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
