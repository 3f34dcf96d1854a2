//! Named connection management for SwapCon
//!
//! An application keeps several connection profiles per category (database,
//! cache, queue, filesystem, logging, broadcasting) and switches between them
//! at runtime. This crate provides:
//!
//! - **Registry**: declared connection definitions, groups and fallback rules
//! - **Resolution**: turning a requested name into a concrete connection,
//!   materializing clones along the way and detecting circular rules
//! - **Switching**: permanent (`use_connection`) and scoped (`swap`) changes
//!   of a category's active connection
//!
//! # Architecture
//!
//! SwapCon never owns the application's configuration. It reads and writes it
//! through a [`ConfigStore`]:
//!
//! ```text
//!                 SwapCon (copy / update / resolve / use / swap)
//!                    |
//!        +-----------+-----------+
//!        |           |           |
//!    Registry    Resolver    Materializer --> builder
//!                                |
//!                           ConfigStore
//!   <category>.default, <category>.<group-key>.<name>
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use swapcon_core::{Category, ConfigStore, ConnectionDefinition, MemoryStore, Registry, SwapCon};
//!
//! let mut registry = Registry::new();
//! registry.add_definition(
//!     Category::Database,
//!     ConnectionDefinition::new("replica").with_clone("mysql").with_value("host", "db2"),
//! );
//!
//! let mut store = MemoryStore::new();
//! store.set("database.connections.mysql", json!({ "host": "db1", "port": "3306" }));
//!
//! let mut swapcon = SwapCon::new(store, registry);
//! assert_eq!(swapcon.use_connection(Category::Database, "replica").unwrap(), "replica");
//! assert_eq!(
//!     swapcon.store().get("database.connections.replica"),
//!     Some(json!({ "host": "db2", "port": "3306" })),
//! );
//! ```

pub mod builder;
pub mod category;
pub mod error;
pub mod manager;
pub mod materializer;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod switcher;

/// Settings of a single concrete connection.
pub type Settings = serde_json::Map<String, serde_json::Value>;

pub use category::Category;
pub use error::{Error, Result};
pub use manager::SwapCon;
pub use materializer::{ConnectionPool, Materializer};
pub use registry::{ConnectionDefinition, Fallbacks, Group, Registry};
pub use resolver::{MAX_DEPTH, Resolver};
pub use store::{ConfigStore, MemoryStore, is_truthy};
