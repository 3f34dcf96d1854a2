//! The `swapcon.toml` settings file

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use swapcon_core::{Category, Fallbacks};

use crate::{Error, Result};

/// Name of the settings file inside a project directory.
pub const SETTINGS_FILE: &str = "swapcon.toml";

/// Prefix used when the settings file doesn't set one.
pub const DEFAULT_PREFIX: &str = "SWAPCON";

/// Env file used when the settings file doesn't name one.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Project-level settings.
///
/// ```toml
/// prefix = "SWAPCON"
/// env_file = ".env"
///
/// [fallbacks.reuse.database]
/// mysql-ro = "mysql"
///
/// [fallbacks.clone.cache]
/// redis-tenant = "redis"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Prefix of the environment variables that declare connections
    pub prefix: String,
    /// Env file, relative to the project directory
    pub env_file: PathBuf,
    /// Reuse and clone fallback rules
    pub fallbacks: Fallbacks,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            fallbacks: Fallbacks::default(),
        }
    }
}

/// The file as written: categories are free-form strings until validated.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    prefix: Option<String>,
    env_file: Option<PathBuf>,
    #[serde(default)]
    fallbacks: RawFallbacks,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFallbacks {
    #[serde(default)]
    reuse: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    clone: BTreeMap<String, BTreeMap<String, String>>,
}

impl Settings {
    /// Load `swapcon.toml` from `dir`, falling back to defaults when the file
    /// doesn't exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse settings file content. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| Error::InvalidSettings {
            path: path.to_path_buf(),
            message,
        };

        let raw: RawSettings = toml::from_str(content).map_err(|e| invalid(e.message().to_string()))?;

        let prefix = raw.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.is_empty() {
            return Err(invalid("prefix must not be empty".to_string()));
        }

        Ok(Self {
            prefix,
            env_file: raw
                .env_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE)),
            fallbacks: Fallbacks {
                reuse: typed_rules(raw.fallbacks.reuse)?,
                clone: typed_rules(raw.fallbacks.clone)?,
            },
        })
    }

    /// Where the env file lives for a project in `dir`.
    pub fn env_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.env_file)
    }
}

fn typed_rules(
    raw: BTreeMap<String, BTreeMap<String, String>>,
) -> Result<BTreeMap<Category, BTreeMap<String, String>>> {
    raw.into_iter()
        .map(|(category, rules)| -> Result<_> { Ok((Category::from_key(&category)?, rules)) })
        .collect()
}
