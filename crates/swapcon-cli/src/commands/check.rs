//! Check command implementation

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;
use swapcon_core::{Category, Registry, SwapCon};

use super::{load_registry, load_store};
use crate::error::{CliError, Result};

/// Run the check command
///
/// Every declared name is resolved against one manager, so materialized
/// clones are visible to the names checked after them. Fails if any name
/// doesn't resolve.
pub fn run_check(dir: &Path, store: Option<&Path>, category: Option<Category>) -> Result<()> {
    let store = load_store(dir, store)?;
    let registry = load_registry(dir, &store)?;
    let names = declared_names(&registry, category);
    let mut swapcon = SwapCon::new(store, registry);

    if names.is_empty() {
        println!("{}", "No connections declared".dimmed());
        return Ok(());
    }

    let mut failures = 0;
    for (category, name) in &names {
        match swapcon.resolve(*category, name) {
            Ok(resolved) => {
                println!("  {} {}.{} -> {}", "ok".green(), category, name, resolved);
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}.{}: {}", "failed".red(), category, name, e);
            }
        }
    }
    println!();

    if failures > 0 {
        return Err(CliError::user(format!(
            "{failures} of {} connection(s) could not be resolved",
            names.len()
        )));
    }
    println!("{} {} connection(s) resolve", "OK".green().bold(), names.len());
    Ok(())
}

/// Definitions, groups and fallback names, optionally limited to one category.
fn declared_names(registry: &Registry, only: Option<Category>) -> BTreeSet<(Category, String)> {
    let fallbacks = registry.fallbacks();
    registry
        .definitions()
        .map(|(c, def)| (c, def.name.clone()))
        .chain(registry.groups().map(|(c, name, _)| (c, name.to_string())))
        .chain(fallbacks.reuse.iter().flat_map(|(c, rules)| {
            rules.keys().map(move |name| (*c, name.clone()))
        }))
        .chain(fallbacks.clone.iter().flat_map(|(c, rules)| {
            rules.keys().map(move |name| (*c, name.clone()))
        }))
        .filter(|(c, _)| only.is_none_or(|wanted| *c == wanted))
        .collect()
}
