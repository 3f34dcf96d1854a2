//! Writing connection definitions into the config store

use std::collections::HashMap;

use serde_json::Value;

use crate::builder;
use crate::error::{Error, Result};
use crate::{Category, ConfigStore, Settings};

/// Live handles kept open for a category's connections.
///
/// When a concrete connection is overwritten, any handle already open under
/// that name was built from the old definition. Registering a pool lets
/// SwapCon purge it so the next use reconnects with the new settings.
pub trait ConnectionPool {
    /// Names of the connections with an open handle.
    fn open_connections(&self) -> Vec<String>;

    /// Close and forget the handle for `name`.
    fn purge(&mut self, name: &str);
}

/// Registered pools, by category.
pub type Pools = HashMap<Category, Box<dyn ConnectionPool>>;

/// Writes definitions into a config store, refusing accidental overwrites.
pub struct Materializer<'a> {
    store: &'a mut dyn ConfigStore,
    pools: &'a mut Pools,
}

impl<'a> Materializer<'a> {
    /// Create a materializer over `store`, purging handles from `pools`.
    pub fn new(store: &'a mut dyn ConfigStore, pools: &'a mut Pools) -> Self {
        Self { store, pools }
    }

    /// Whether `<category>.<group-key>.<name>` is already concrete.
    pub fn exists(&self, category: Category, name: &str) -> bool {
        self.store.has(&category.connection_path(name))
    }

    /// Store `definition` as the concrete connection `name`.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyExists`] when the connection is already concrete and
    /// `allow_overwrite` is false.
    pub fn store(
        &mut self,
        category: Category,
        name: &str,
        definition: Settings,
        allow_overwrite: bool,
    ) -> Result<()> {
        if self.exists(category, name) && !allow_overwrite {
            return Err(Error::AlreadyExists {
                category,
                connection: name.to_string(),
            });
        }

        tracing::debug!(%category, connection = name, "Storing connection");
        self.store
            .set(&category.connection_path(name), Value::Object(definition));

        if let Some(pool) = self.pools.get_mut(&category) {
            if pool.open_connections().iter().any(|open| open == name) {
                tracing::debug!(%category, connection = name, "Purging open connection");
                pool.purge(name);
            }
        }

        Ok(())
    }

    /// Build a connection from `source` plus `overrides` and store it as `name`.
    ///
    /// With no `source`, the overrides alone make up the connection.
    pub fn copy_connection(
        &mut self,
        category: Category,
        source: Option<&str>,
        name: &str,
        overrides: Settings,
        allow_overwrite: bool,
    ) -> Result<()> {
        let definition = builder::build(&*self.store, overrides, Some(category), source)?;
        self.store(category, name, definition, allow_overwrite)
    }
}
