//! Reading `.env` style files
//!
//! Parsing is done by `dotenvy`, so the usual syntax applies: comments,
//! `export`, single and double quotes, multi-line double-quoted values and
//! `${VAR}` substitution. Nothing is written to the process environment.

use std::io;
use std::path::Path;

use crate::{Error, Result};

/// Parse env-file content into `(key, value)` pairs, in file order.
///
/// `path` is only used in error messages.
pub fn parse(content: &str, path: &Path) -> Result<Vec<(String, String)>> {
    dotenvy::from_read_iter(content.as_bytes())
        .map(|item| item.map_err(|e| invalid(path, e)))
        .collect()
}

/// Read and parse an env file.
///
/// A missing file yields `Ok(None)`, so callers can treat it as "no
/// settings" rather than a failure.
pub fn read(path: &Path) -> Result<Option<Vec<(String, String)>>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(invalid(path, e)),
    };
    iter.map(|item| item.map_err(|e| invalid(path, e)))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn invalid(path: &Path, source: dotenvy::Error) -> Error {
    Error::InvalidEnvFile {
        path: path.to_path_buf(),
        source,
    }
}
