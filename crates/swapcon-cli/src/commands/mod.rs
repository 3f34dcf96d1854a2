//! Command implementations for swapcon-cli

pub mod check;
pub mod inspect;
pub mod resolve;

pub use check::run_check;
pub use inspect::run_inspect;
pub use resolve::run_resolve;

use std::path::Path;

use swapcon_core::{MemoryStore, Registry};

use crate::error::{CliError, Result};

/// Config-store key under which an application config may carry its own
/// registry, alongside the one built from the env file.
pub const REGISTRY_KEY: &str = "swapcon";

/// Load an application config into a store. `.json` files are read as JSON,
/// anything else as TOML. Relative paths are taken from `dir`.
///
/// Without a file the store starts empty.
pub fn load_store(dir: &Path, file: Option<&Path>) -> Result<MemoryStore> {
    let Some(file) = file else {
        return Ok(MemoryStore::new());
    };
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path)
        .map_err(|e| CliError::user(format!("Cannot read {}: {e}", path.display())))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let store = if is_json {
        MemoryStore::from_json_str(&content)?
    } else {
        MemoryStore::from_toml_str(&content)?
    };
    tracing::debug!(path = %path.display(), "Loaded application config");
    Ok(store)
}

/// The registry for a project: whatever the application config carries under
/// [`REGISTRY_KEY`], overlaid with the project's env file and settings.
pub fn load_registry(dir: &Path, store: &MemoryStore) -> Result<Registry> {
    let mut registry = Registry::from_store(store, REGISTRY_KEY)?;
    registry.merge(&swapcon_env::build_config(dir)?);
    Ok(registry)
}
