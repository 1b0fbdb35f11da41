// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskmillError};

/// Read and deserialize a plan file without checking it.
///
/// Use [`load_and_validate`] to also reject unknown dependencies, cycles and
/// the like.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| TaskmillError::ReadPlan {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

/// Read a plan file and validate it.
///
/// Missing fields take their serde defaults. Rejects:
///   - duplicate or empty task names,
///   - unknown or self `after` references,
///   - dependency cycles,
///   - `concurrency = 0`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    ConfigFile::try_from(load_from_path(path)?)
}

/// Parse and validate TOML that is already in memory.
pub fn parse_and_validate(contents: &str) -> Result<ConfigFile> {
    ConfigFile::try_from(toml::from_str::<RawConfigFile>(contents)?)
}

/// Plan file used when `--config` is not given, relative to the working
/// directory.
pub const DEFAULT_PLAN_FILE: &str = "Taskmill.toml";
