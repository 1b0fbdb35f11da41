// tests/command_tasks.rs
//
// Real processes, real clock.

#![cfg(unix)]

mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::{init_tracing, with_timeout};

use std::io::Write;
use std::time::{Duration, Instant};

use taskmill::cli::CliArgs;
use taskmill::plan::Plan;
use taskmill::TaskStatus;

#[tokio::test]
async fn exit_codes_decide_task_status() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .concurrency(2)
        .with_task(TaskConfigBuilder::new("ok", "true").build())
        .with_task(TaskConfigBuilder::new("broken", "exit 1").build())
        .with_task(TaskConfigBuilder::new("after_ok", "echo fine").after("ok").build())
        .with_task(
            TaskConfigBuilder::new("after_broken", "true")
                .after("broken")
                .build(),
        )
        .build();

    let plan = Plan::from_config(&cfg);
    with_timeout(plan.manager().run()).await;

    let snapshot = plan.manager().snapshot();
    let status = |name: &str| snapshot.get(plan.id_of(name).expect("declared"));
    assert_eq!(status("ok"), Some(TaskStatus::Completed));
    assert_eq!(status("broken"), Some(TaskStatus::Failed));
    assert_eq!(status("after_ok"), Some(TaskStatus::Completed));
    assert_eq!(status("after_broken"), Some(TaskStatus::Canceled));
}

#[tokio::test]
async fn slow_command_times_out_and_is_killed() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .abort_on_timeout(true)
        .with_task(
            TaskConfigBuilder::new("sleepy", "sleep 5")
                .timeout_ms(200)
                .build(),
        )
        .with_task(TaskConfigBuilder::new("next", "true").after("sleepy").build())
        .build();

    let plan = Plan::from_config(&cfg);
    let started = Instant::now();
    with_timeout(plan.manager().run()).await;

    assert!(started.elapsed() < Duration::from_secs(4));
    let snapshot = plan.manager().snapshot();
    assert_eq!(
        snapshot.get(plan.id_of("sleepy").expect("declared")),
        Some(TaskStatus::Timeout)
    );
    assert_eq!(
        snapshot.get(plan.id_of("next").expect("declared")),
        Some(TaskStatus::Canceled)
    );
}

fn cli_args(config: &std::path::Path, dry_run: bool) -> CliArgs {
    CliArgs {
        config: config.display().to_string(),
        concurrency: None,
        report_interval_ms: Some(20),
        log_level: None,
        dry_run,
    }
}

#[tokio::test]
async fn cli_entry_point_runs_a_plan_file() {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[config]
concurrency = 2

[[task]]
name = "first"
cmd = "true"

[[task]]
name = "second"
cmd = "sleep 0.1"
after = ["first"]
"#
    )
    .expect("write plan");

    let dry = with_timeout(taskmill::run(cli_args(file.path(), true))).await;
    assert!(dry.expect("dry run succeeds"));

    let all_completed = with_timeout(taskmill::run(cli_args(file.path(), false))).await;
    assert!(all_completed.expect("run succeeds"));
}

#[tokio::test]
async fn cli_entry_point_reports_failed_tasks() {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "[[task]]\nname = \"bad\"\ncmd = \"exit 2\"\n").expect("write plan");

    let all_completed = with_timeout(taskmill::run(cli_args(file.path(), false))).await;
    assert!(!all_completed.expect("run itself succeeds"));
}

#[tokio::test]
async fn cli_entry_point_surfaces_load_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = taskmill::run(cli_args(&dir.path().join("missing.toml"), false))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("loading plan"), "{err:#}");
}
