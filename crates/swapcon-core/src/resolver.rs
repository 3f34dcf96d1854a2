//! Connection-name resolution
//!
//! The [`Resolver`] turns a requested connection name into one that is
//! concrete in the config store. On the way it may materialize declared
//! definitions, pick a member of a group, or follow reuse/clone fallbacks.
//!
//! Rules are tried in a fixed order for each candidate name:
//!
//! 1. the name is already concrete in the store: done
//! 2. the name was resolved before: reuse that outcome (even a failure)
//! 3. a definition with that name: materialize it
//! 4. a group with that name: pick a member at random
//! 5. a reuse fallback: resolve its target instead
//! 6. a clone fallback: resolve its template and copy it under the name
//!
//! Every outcome is recorded so a group keeps picking the same member and a
//! name that failed once fails fast afterwards. The record is never
//! invalidated: redefining a connection after it was resolved doesn't change
//! what the same name resolves to for this resolver.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::materializer::Materializer;
use crate::{Category, Registry, Settings};

/// How many steps a resolution may take before it's considered circular.
pub const MAX_DEPTH: usize = 32;

/// Resolves requested connection names, remembering past outcomes.
#[derive(Debug, Default)]
pub struct Resolver {
    used_replacements: HashMap<Category, HashMap<String, Option<String>>>,
}

impl Resolver {
    /// Create a resolver with nothing resolved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` to a connection that's concrete in the store.
    ///
    /// # Errors
    ///
    /// - [`Error::Unresolvable`] when no rule applies to a candidate name.
    ///   The error names the originally requested connection.
    /// - [`Error::MaxRecursionExceeded`] when resolution takes
    ///   [`MAX_DEPTH`] steps, which means the rules form a cycle.
    /// - [`Error::TemplateNotFound`] / [`Error::AlreadyExists`] from
    ///   materializing a definition.
    pub fn resolve(
        &mut self,
        registry: &Registry,
        materializer: &mut Materializer<'_>,
        category: Category,
        name: &str,
    ) -> Result<String> {
        self.resolve_from(
            registry,
            materializer,
            category,
            Some(name.to_string()),
            name,
            0,
        )
    }

    /// What `name` resolved to before, if it has been resolved.
    ///
    /// `Some(None)` means the earlier resolution failed.
    pub fn resolved(&self, category: Category, name: &str) -> Option<Option<&str>> {
        self.used_replacements
            .get(&category)?
            .get(name)
            .map(Option::as_deref)
    }

    fn resolve_from(
        &mut self,
        registry: &Registry,
        materializer: &mut Materializer<'_>,
        category: Category,
        mut candidate: Option<String>,
        orig_name: &str,
        mut depth: usize,
    ) -> Result<String> {
        loop {
            let Some(current) = candidate else {
                return Err(Error::Unresolvable {
                    category,
                    connection: orig_name.to_string(),
                });
            };
            if depth >= MAX_DEPTH - 1 {
                return Err(Error::MaxRecursionExceeded {
                    category,
                    connection: orig_name.to_string(),
                });
            }

            if materializer.exists(category, &current) {
                tracing::debug!(%category, connection = %current, depth, "Resolved");
                return Ok(current);
            }

            let resolved = match self.resolved(category, &current) {
                Some(previous) => previous.map(str::to_string),
                None => self.apply_rules(
                    registry,
                    materializer,
                    category,
                    &current,
                    orig_name,
                    depth,
                )?,
            };

            self.used_replacements
                .entry(category)
                .or_default()
                .insert(current, resolved.clone());

            candidate = resolved;
            depth += 1;
        }
    }

    fn apply_rules(
        &mut self,
        registry: &Registry,
        materializer: &mut Materializer<'_>,
        category: Category,
        current: &str,
        orig_name: &str,
        depth: usize,
    ) -> Result<Option<String>> {
        if let Some(definition) = registry.definition(category, current) {
            tracing::debug!(%category, connection = current, depth, "Materializing definition");
            materializer.copy_connection(
                category,
                definition.clone.as_deref(),
                &definition.name,
                definition.settings(),
                false,
            )?;
            return Ok(Some(definition.name.clone()));
        }

        if let Some(group) = registry.group(category, current) {
            let picked = group.pick().map(str::to_string);
            tracing::debug!(%category, group = current, picked = ?picked, "Picked group member");
            return Ok(picked);
        }

        if let Some(target) = registry.reuse_target(category, current) {
            tracing::debug!(%category, connection = current, target, "Following reuse fallback");
            let resolved = self.resolve_from(
                registry,
                materializer,
                category,
                Some(target.to_string()),
                orig_name,
                depth + 1,
            )?;
            return Ok(Some(resolved));
        }

        if let Some(template) = registry.clone_template(category, current) {
            tracing::debug!(%category, connection = current, template, "Following clone fallback");
            let source = self.resolve_from(
                registry,
                materializer,
                category,
                Some(template.to_string()),
                orig_name,
                depth + 1,
            )?;
            materializer.copy_connection(category, Some(&source), current, Settings::new(), false)?;
            return Ok(Some(current.to_string()));
        }

        tracing::debug!(%category, connection = current, "No rule applies");
        Ok(None)
    }
}
