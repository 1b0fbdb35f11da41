// src/exec/command.rs

//! Task bodies that run a shell command.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::dag::{TaskBody, boxed_body};

/// Build a task body that runs `cmd` through the platform shell.
///
/// The body succeeds iff the command exits with status 0. The child is killed
/// if the body is dropped before it exits (e.g. aborted after a timeout).
pub fn command_body(name: impl Into<String>, cmd: impl Into<String>) -> TaskBody {
    let name = name.into();
    let cmd = cmd.into();
    boxed_body(move || run_command(name, cmd))
}

/// Run `cmd` to completion, forwarding its output into the log.
pub async fn run_command(name: String, cmd: String) -> Result<()> {
    info!(task = %name, cmd = %cmd, "starting task process");

    let mut command = shell_command(&cmd);
    command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning process for task '{name}'"))?;

    if let Some(stdout) = child.stdout.take() {
        let task_name = name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(task = %task_name, "stdout: {}", line);
            }
        });
    }

    // Always consume stderr so the pipe never fills up.
    if let Some(stderr) = child.stderr.take() {
        let task_name = name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(task = %task_name, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{name}'"))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %name,
        exit_code = code,
        success = status.success(),
        "task process exited"
    );

    if !status.success() {
        bail!("command `{cmd}` exited with code {code}");
    }
    Ok(())
}

fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}
