//! Resolve command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;
use swapcon_core::{Category, ConfigStore, SwapCon};

use super::{load_registry, load_store};
use crate::error::Result;

/// Run the resolve command
pub fn run_resolve(
    dir: &Path,
    category: Category,
    name: &str,
    store: Option<&Path>,
    json: bool,
) -> Result<()> {
    let store = load_store(dir, store)?;
    let registry = load_registry(dir, &store)?;
    let mut swapcon = SwapCon::new(store, registry);

    let resolved = swapcon.resolve(category, name)?;
    let connection = swapcon.store().get(&category.connection_path(&resolved));

    if json {
        let output = json!({
            "category": category,
            "requested": name,
            "resolved": resolved,
            "connection": connection,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}.{} -> {}",
        "Resolved".green().bold(),
        category,
        name.cyan(),
        resolved.cyan().bold()
    );
    if let Some(connection) = connection {
        println!("{}", serde_json::to_string_pretty(&connection)?);
    }
    Ok(())
}
