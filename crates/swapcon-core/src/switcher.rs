//! Switching a category's active connection
//!
//! [`SwapCon::use_connection`] changes `<category>.default` for good.
//! [`SwapCon::swap`] changes it for the duration of a closure and puts the
//! previous value back however the closure exits: returning, failing or
//! panicking. Swaps nest; each one restores what it found.

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::{Category, ConfigStore, SwapCon};

impl<S: ConfigStore> SwapCon<S> {
    /// The active connection for `category`, if one is set.
    pub fn current(&self, category: Category) -> Option<String> {
        self.store
            .get(&category.default_path())
            .and_then(|value| value.as_str().map(str::to_string))
    }

    /// Resolve `name` and make it the active connection for `category`.
    ///
    /// Returns the resolved name.
    pub fn use_connection(&mut self, category: Category, name: &str) -> Result<String> {
        let resolved = self.resolve(category, name)?;
        tracing::debug!(%category, requested = name, connection = %resolved, "Using connection");
        self.store
            .set(&category.default_path(), Value::String(resolved.clone()));
        Ok(resolved)
    }

    /// Run `work` with `name` as the active connection for `category`.
    ///
    /// The active connection in place beforehand is restored when `work`
    /// finishes, including when it returns an error or panics. `work`'s
    /// error is passed through unchanged. Resolution failures are converted
    /// into `E`, and in that case `work` isn't run.
    pub fn swap<T, E, F>(&mut self, category: Category, name: &str, work: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut SwapCon<S>) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let path = category.default_path();
        let previous = self.store.get(&path).unwrap_or(Value::Null);

        let resolved = self.resolve(category, name)?;
        tracing::debug!(%category, requested = name, connection = %resolved, "Swapping connection");
        self.store.set(&path, Value::String(resolved));

        let mut guard = RestoreDefault {
            swapcon: self,
            path,
            previous: Some(previous),
        };
        let outcome = work(&mut *guard);
        drop(guard);
        outcome
    }
}

/// Puts a category's previous active connection back when dropped.
struct RestoreDefault<'a, S: ConfigStore> {
    swapcon: &'a mut SwapCon<S>,
    path: String,
    previous: Option<Value>,
}

impl<S: ConfigStore> Deref for RestoreDefault<'_, S> {
    type Target = SwapCon<S>;

    fn deref(&self) -> &Self::Target {
        self.swapcon
    }
}

impl<S: ConfigStore> DerefMut for RestoreDefault<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.swapcon
    }
}

impl<S: ConfigStore> Drop for RestoreDefault<'_, S> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::debug!(path = %self.path, restored = %previous, "Restoring connection");
            self.swapcon.store.set(&self.path, previous);
        }
    }
}
