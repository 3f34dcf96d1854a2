//! Inspect command implementation

use std::path::Path;

use colored::Colorize;
use swapcon_core::Registry;

use crate::error::Result;

/// Run the inspect command
pub fn run_inspect(dir: &Path, json: bool) -> Result<()> {
    let registry = swapcon_env::build_config(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry.to_value()?)?);
        return Ok(());
    }

    print_registry(&registry);
    Ok(())
}

fn print_registry(registry: &Registry) {
    println!("{}:", "Groups".bold());
    let mut any = false;
    for (category, name, group) in registry.groups() {
        any = true;
        println!(
            "  {}.{} -> {}",
            category.to_string().dimmed(),
            name.cyan(),
            group.members().join(", ")
        );
    }
    if !any {
        println!("  {}", "None".dimmed());
    }
    println!();

    println!("{}:", "Connections".bold());
    if registry.definition_count() == 0 {
        println!("  {}", "None".dimmed());
    }
    for (category, definition) in registry.definitions() {
        let template = match &definition.clone {
            Some(template) => format!(" (clone of {})", template.yellow()),
            None => String::new(),
        };
        println!(
            "  {}.{}{}",
            category.to_string().dimmed(),
            definition.name.cyan(),
            template
        );
        for (key, value) in &definition.values {
            println!("      {key} = {value}");
        }
    }
    println!();

    println!("{}:", "Fallbacks".bold());
    let fallbacks = registry.fallbacks();
    if fallbacks.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for (category, rules) in &fallbacks.reuse {
        for (name, target) in rules {
            println!(
                "  {}.{} {} {}",
                category.to_string().dimmed(),
                name.cyan(),
                "reuses".green(),
                target
            );
        }
    }
    for (category, rules) in &fallbacks.clone {
        for (name, template) in rules {
            println!(
                "  {}.{} {} {}",
                category.to_string().dimmed(),
                name.cyan(),
                "clones".yellow(),
                template
            );
        }
    }
}
