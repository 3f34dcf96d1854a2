//! [`TestProject`] builder for env and settings files on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory holding a `.env` file, a `swapcon.toml`
/// and application config files.
///
/// # Example
///
/// ```rust,no_run
/// use swapcon_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.write_env("SWAPCON__DATABASE__MYSQL2__CLONE=mysql\n");
/// project.write_settings("[fallbacks.reuse.database]\nmysql-ro = \"mysql\"\n");
/// assert!(project.path(".env").exists());
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `.env`.
    pub fn write_env(&self, content: &str) -> &Self {
        self.write_file(".env", content)
    }

    /// Write `swapcon.toml`.
    pub fn write_settings(&self, content: &str) -> &Self {
        self.write_file("swapcon.toml", content)
    }

    /// Write any file, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }
}

/// The env file used by the config interpretation tests: for every category,
/// a group `con = con1, con2`, a connection `con1` cloned from `test1` and a
/// plain connection `con2`.
pub fn sample_env() -> String {
    let mut env = String::from("# generated fixture\nAPP_NAME=swapcon\n\n");
    for category in [
        "BROADCASTING",
        "CACHE",
        "DATABASE",
        "FILESYSTEMS",
        "LOGGING",
        "QUEUE",
    ] {
        env.push_str(&format!("SWAPCON__GROUP__{category}__CON=\"con1, con2\"\n"));
        env.push_str(&format!("SWAPCON__{category}__CON1__CLONE=test1\n"));
        env.push_str(&format!("SWAPCON__{category}__CON1__MYVAL=con1\n"));
        env.push_str(&format!("SWAPCON__{category}__CON2__MYVAL=con2\n"));
    }
    env
}
