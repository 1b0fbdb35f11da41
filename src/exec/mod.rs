// src/exec/mod.rs

//! Task execution layer.
//!
//! - [`task_runner`] starts a launched body, races it against its timeout
//!   and reports the outcome to the runtime as a `RuntimeEvent`.
//! - [`command`] builds task bodies that run shell commands via
//!   `tokio::process::Command`.

pub mod command;
pub mod task_runner;

pub use command::command_body;
pub use task_runner::{run_task, spawn_task};
