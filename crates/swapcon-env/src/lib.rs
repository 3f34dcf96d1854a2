//! Env-file config source for SwapCon
//!
//! Builds a [`Registry`] for a project directory from two files:
//!
//! - `swapcon.toml`: the variable prefix, the env file to read and the
//!   reuse/clone fallback rules (see [`Settings`])
//! - the env file (`.env` by default): groups and connection definitions
//!   declared as prefixed variables (see [`interpret`])
//!
//! Both files are optional. A project with neither yields an empty registry.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use swapcon_core::{Category, MemoryStore, SwapCon};
//!
//! let registry = swapcon_env::build_config(Path::new("/srv/app"))?;
//! let mut swapcon = SwapCon::new(MemoryStore::new(), registry);
//! swapcon.use_connection(Category::Database, "replica")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod dotenv;
pub mod error;
pub mod settings;
pub mod source;

pub use error::{Error, Result};
pub use settings::Settings;
pub use source::{EnvSource, interpret};

use std::path::Path;

use swapcon_core::Registry;

/// Build the complete registry for the project in `dir`.
///
/// Fallback rules come from the settings file; groups and definitions from
/// the env file it names.
pub fn build_config(dir: &Path) -> Result<Registry> {
    let settings = Settings::load(dir)?;
    build_config_with(dir, &settings)
}

/// Like [`build_config`], with settings already loaded.
pub fn build_config_with(dir: &Path, settings: &Settings) -> Result<Registry> {
    let source = EnvSource::new(settings.env_path(dir), settings.prefix.clone());
    let mut registry = source.load()?;

    for (category, rules) in &settings.fallbacks.reuse {
        for (name, target) in rules {
            registry.add_reuse(*category, name, target);
        }
    }
    for (category, rules) in &settings.fallbacks.clone {
        for (name, template) in rules {
            registry.add_clone(*category, name, template);
        }
    }

    tracing::info!(
        dir = %dir.display(),
        definitions = registry.definition_count(),
        "Built connection registry"
    );
    Ok(registry)
}
