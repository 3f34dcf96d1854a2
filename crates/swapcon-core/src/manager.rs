//! The [`SwapCon`] entry point
//!
//! Ties the registry, the resolver and a config store together and exposes
//! the category-parametric operations applications call: `copy`, `update`,
//! `resolve`, `resolve_all`, and the switching operations in
//! [`switcher`](crate::switcher).

use crate::error::Result;
use crate::materializer::{ConnectionPool, Materializer, Pools};
use crate::resolver::Resolver;
use crate::{Category, ConfigStore, Registry, Settings};

/// Manages named connections for each category of a config store.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use swapcon_core::{Category, ConfigStore, MemoryStore, Registry, Settings, SwapCon};
///
/// let mut registry = Registry::new();
/// registry.add_clone(Category::Database, "reporting", "mysql");
///
/// let mut store = MemoryStore::new();
/// store.set("database.default", json!("mysql"));
/// store.set("database.connections.mysql", json!({ "host": "db1" }));
///
/// let mut swapcon = SwapCon::new(store, registry);
/// let seen = swapcon
///     .swap(Category::Database, "reporting", |swapcon| {
///         Ok::<_, swapcon_core::Error>(swapcon.current(Category::Database))
///     })
///     .unwrap();
///
/// assert_eq!(seen.as_deref(), Some("reporting"));
/// assert_eq!(swapcon.current(Category::Database).as_deref(), Some("mysql"));
/// ```
pub struct SwapCon<S: ConfigStore> {
    pub(crate) store: S,
    registry: Registry,
    resolver: Resolver,
    pools: Pools,
}

impl<S: ConfigStore> SwapCon<S> {
    /// Create a manager over `store` using the declarations in `registry`.
    pub fn new(store: S, registry: Registry) -> Self {
        Self {
            store,
            registry,
            resolver: Resolver::new(),
            pools: Pools::new(),
        }
    }

    /// Create a manager whose registry is kept in the store under `key`.
    pub fn from_store(store: S, key: &str) -> Result<Self> {
        let registry = Registry::from_store(&store, key)?;
        Ok(Self::new(store, registry))
    }

    /// Register the live pool for a category (builder pattern).
    ///
    /// Overwriting a concrete connection of that category purges the
    /// pool's handle of the same name.
    pub fn with_pool(mut self, category: Category, pool: impl ConnectionPool + 'static) -> Self {
        self.pools.insert(category, Box::new(pool));
        self
    }

    /// The config store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the config store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the manager, returning the config store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The declared definitions, groups and fallbacks.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The resolver, for inspecting past outcomes.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Copy the concrete connection `source` to `name`, applying `overrides`.
    ///
    /// With no `source` the overrides alone become the new connection.
    ///
    /// # Errors
    ///
    /// - [`Error::TemplateNotFound`](crate::Error::TemplateNotFound) when
    ///   `source` isn't concrete.
    /// - [`Error::AlreadyExists`](crate::Error::AlreadyExists) when `name`
    ///   is concrete and `allow_overwrite` is false.
    pub fn copy(
        &mut self,
        category: Category,
        source: Option<&str>,
        name: &str,
        overrides: Settings,
        allow_overwrite: bool,
    ) -> Result<()> {
        Materializer::new(&mut self.store, &mut self.pools).copy_connection(
            category,
            source,
            name,
            overrides,
            allow_overwrite,
        )
    }

    /// Apply `overrides` to the concrete connection `name` in place.
    pub fn update(&mut self, category: Category, name: &str, overrides: Settings) -> Result<()> {
        self.copy(category, Some(name), name, overrides, true)
    }

    /// Resolve `name` to a connection that's concrete in the store.
    ///
    /// See [`Resolver::resolve`] for the rules and errors.
    pub fn resolve(&mut self, category: Category, name: &str) -> Result<String> {
        let mut materializer = Materializer::new(&mut self.store, &mut self.pools);
        self.resolver
            .resolve(&self.registry, &mut materializer, category, name)
    }

    /// Resolve every declared definition, optionally only for `category`.
    ///
    /// Useful for warming up at start-up so configuration mistakes surface
    /// early. Stops at the first error.
    pub fn resolve_all(&mut self, category: Option<Category>) -> Result<()> {
        let names: Vec<(Category, String)> = self
            .registry
            .definitions()
            .filter(|(c, _)| category.is_none_or(|wanted| *c == wanted))
            .map(|(c, def)| (c, def.name.clone()))
            .collect();

        for (category, name) in names {
            self.resolve(category, &name)?;
        }
        Ok(())
    }
}
