//! Connection registry
//!
//! Declared connection definitions, groups and fallback rules. The resolver
//! only reads from the registry; concrete connections live in the config
//! store.

mod store;
mod types;

pub use store::Registry;
pub use types::{ConnectionDefinition, Fallbacks, Group};
