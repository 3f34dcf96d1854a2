//! Connection categories and their config-store layout

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The kinds of connection SwapCon can switch between.
///
/// Each category corresponds to a section of the config store (its
/// [`key`](Category::key)) and a sub-section inside it holding the concrete
/// connection definitions (its [`group_key`](Category::group_key)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Broadcasting,
    Cache,
    Database,
    #[serde(rename = "filesystems")]
    Filesystem,
    Logging,
    Queue,
}

impl Category {
    /// Every category, in config-key order.
    pub const ALL: [Category; 6] = [
        Category::Broadcasting,
        Category::Cache,
        Category::Database,
        Category::Filesystem,
        Category::Logging,
        Category::Queue,
    ];

    /// The top-level config-store key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Broadcasting => "broadcasting",
            Category::Cache => "cache",
            Category::Database => "database",
            Category::Filesystem => "filesystems",
            Category::Logging => "logging",
            Category::Queue => "queue",
        }
    }

    /// The sub-section holding concrete connection definitions.
    pub fn group_key(&self) -> &'static str {
        match self {
            Category::Broadcasting => "connections",
            Category::Cache => "stores",
            Category::Database => "connections",
            Category::Filesystem => "disks",
            Category::Logging => "channels",
            Category::Queue => "connections",
        }
    }

    /// Path of the active connection name, e.g. `database.default`.
    pub fn default_path(&self) -> String {
        format!("{}.default", self.key())
    }

    /// Path of a concrete connection definition, e.g. `cache.stores.redis`.
    pub fn connection_path(&self, name: &str) -> String {
        format!("{}.{}.{}", self.key(), self.group_key(), name)
    }

    /// Parse a config key exactly as [`key`](Category::key) spells it,
    /// ignoring case. Config sources use this; the short aliases accepted by
    /// [`FromStr`] are not recognised here.
    pub fn from_key(s: &str) -> Result<Self, Error> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.key() == lowered)
            .ok_or_else(|| Self::unknown(lowered))
    }

    fn unknown(lowered: String) -> Error {
        Error::UnknownCategory {
            category: lowered,
            available: Self::available(),
        }
    }

    /// Comma separated list of the recognised config keys.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|c| c.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts the config key as well as the short names applications tend
    /// to use for each category (`db`, `log`, `filesystem`, `broadcast`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "broadcasting" | "broadcast" => Ok(Category::Broadcasting),
            "cache" => Ok(Category::Cache),
            "database" | "db" => Ok(Category::Database),
            "filesystems" | "filesystem" => Ok(Category::Filesystem),
            "logging" | "log" => Ok(Category::Logging),
            "queue" => Ok(Category::Queue),
            _ => Err(Self::unknown(lowered)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
