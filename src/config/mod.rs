// src/config/mod.rs

//! Configuration loading and validation for taskmill.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like DAG correctness (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_PLAN_FILE, load_and_validate, load_from_path, parse_and_validate};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
