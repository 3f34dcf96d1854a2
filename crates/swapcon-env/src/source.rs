//! Interpreting environment variables as registry entries

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use swapcon_core::{Category, ConnectionDefinition, Registry};

use crate::{Result, dotenv};

/// The setting name that selects a definition's template.
const CLONE_SETTING: &str = "clone";

/// Build a registry from environment variables named with `prefix`.
///
/// Two shapes of name are recognised (separators are one or more `_`):
///
/// - `<PREFIX>_GROUP_<CATEGORY>_<NAME>=a, b` declares a group whose members
///   are split on commas and whitespace
/// - `<PREFIX>_<CATEGORY>_<NAME>_<SETTING>=value` adds a setting to a
///   connection definition; the setting `CLONE` names its template
///
/// Names, categories, settings and group members are lower-cased. Values are
/// kept as written. Variables that don't start with the prefix, or that
/// start with it but match neither shape, are skipped.
///
/// # Example
///
/// ```rust
/// use swapcon_core::Category;
/// use swapcon_env::interpret;
///
/// let registry = interpret(
///     "SWAPCON",
///     [
///         ("SWAPCON__GROUP__DATABASE__READ", "mysql1,mysql2"),
///         ("SWAPCON__DATABASE__MYSQL2__CLONE", "mysql"),
///         ("SWAPCON__DATABASE__MYSQL2__HOST", "10.0.0.2"),
///     ],
/// )
/// .unwrap();
///
/// let definition = registry.definition(Category::Database, "mysql2").unwrap();
/// assert_eq!(definition.clone.as_deref(), Some("mysql"));
/// assert_eq!(registry.group(Category::Database, "read").unwrap().members().len(), 2);
/// ```
pub fn interpret<I, K, V>(prefix: &str, vars: I) -> Result<Registry>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let prefix = regex::escape(prefix);
    let group_pattern = Regex::new(&format!("^{prefix}_+GROUP_+([^_]+)_+([^_]+)$"))?;
    let connection_pattern = Regex::new(&format!("^{prefix}_+([^_]+)_+([^_]+)_+([^_]+)$"))?;
    let separator = Regex::new(r"[\s,]+")?;

    let mut registry = Registry::new();
    let mut definitions: BTreeMap<(Category, String), ConnectionDefinition> = BTreeMap::new();

    for (key, value) in vars {
        let (key, value) = (key.as_ref(), value.as_ref());

        if let Some(captures) = group_pattern.captures(key) {
            let category = Category::from_key(&captures[1])?;
            let members = separator
                .split(value)
                .filter(|member| !member.is_empty())
                .map(str::to_lowercase)
                .collect();
            registry.add_group(category, captures[2].to_lowercase(), members)?;
            continue;
        }

        if let Some(captures) = connection_pattern.captures(key) {
            let category = Category::from_key(&captures[1])?;
            let name = captures[2].to_lowercase();
            let setting = captures[3].to_lowercase();

            let definition = definitions
                .entry((category, name.clone()))
                .or_insert_with(|| ConnectionDefinition::new(name));
            if setting == CLONE_SETTING {
                definition.clone = Some(value.to_string());
            } else {
                definition.values.insert(setting, value.to_string());
            }
            continue;
        }

        tracing::trace!(key, "Ignoring variable");
    }

    for ((category, _), definition) in definitions {
        registry.add_definition(category, definition);
    }

    tracing::debug!(
        definitions = registry.definition_count(),
        "Interpreted environment"
    );
    Ok(registry)
}

/// An env file read as a config source.
#[derive(Debug, Clone)]
pub struct EnvSource {
    path: PathBuf,
    prefix: String,
}

impl EnvSource {
    /// Source reading `path`, interpreting variables that start with `prefix`.
    pub fn new(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    /// Path of the env file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file and interpret its variables.
    ///
    /// A missing file isn't an error; it yields an empty registry.
    pub fn load(&self) -> Result<Registry> {
        match dotenv::read(&self.path)? {
            Some(pairs) => {
                tracing::debug!(path = %self.path.display(), vars = pairs.len(), "Read env file");
                interpret(&self.prefix, pairs)
            }
            None => {
                tracing::warn!(path = %self.path.display(), "Env file not found");
                Ok(Registry::new())
            }
        }
    }
}
