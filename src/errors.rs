// src/errors.rs

//! Errors surfaced by the library API and plan loading.
//!
//! Task bodies never produce a `TaskmillError`: their failures, timeouts and
//! panics are recorded as task statuses instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum TaskmillError {
    /// The plan parsed but is semantically invalid.
    #[error("invalid plan: {0}")]
    ConfigError(String),

    #[error("cannot read plan file '{}': {source}", path.display())]
    ReadPlan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no task registered with id {0}")]
    TaskNotFound(TaskId),

    #[error("task dependencies form a cycle through {0}")]
    DagCycle(String),

    #[error("malformed plan TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TaskmillError>;
