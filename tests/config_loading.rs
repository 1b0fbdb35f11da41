// tests/config_loading.rs

mod common;
use crate::common::bodies::{fail_after, succeed_after};
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::init_tracing;

use std::io::Write;

use tempfile::NamedTempFile;

use taskmill::config::load_and_validate;
use taskmill::plan::Plan;
use taskmill::{TaskStatus, TaskmillError};

fn write_plan(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write plan");
    file
}

const DIAMOND: &str = r#"
[config]
concurrency = 2

[[task]]
name = "publish"
cmd = "true"
after = ["test", "lint"]

[[task]]
name = "build"
cmd = "true"
priority = 5

[[task]]
name = "test"
cmd = "true"
after = ["build"]
timeout_ms = 1000

[[task]]
name = "lint"
cmd = "false"
after = ["build"]
"#;

#[test]
fn plan_file_round_trips_into_config() {
    let file = write_plan(DIAMOND);
    let cfg = load_and_validate(file.path()).expect("valid plan");

    assert_eq!(cfg.config.concurrency, 2);
    assert!(!cfg.config.exit_when_stalled);
    let names: Vec<&str> = cfg.task.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["publish", "build", "test", "lint"]);

    let test = cfg.task_by_name("test").expect("declared");
    assert_eq!(test.after, ["build"]);
    assert_eq!(test.timeout(), Some(std::time::Duration::from_millis(1000)));
    assert_eq!(cfg.task_by_name("build").map(|t| t.priority), Some(5));
}

#[tokio::test(start_paused = true)]
async fn forward_references_resolve_and_failures_cascade() {
    init_tracing();

    let file = write_plan(DIAMOND);
    let cfg = load_and_validate(file.path()).expect("valid plan");

    let plan = Plan::with_bodies(&cfg, cfg.config.run_options(), |task| {
        if task.cmd == "false" {
            fail_after(10, "lint errors")
        } else {
            succeed_after(10)
        }
    });

    assert_eq!(
        plan.manager().snapshot().get(plan.id_of("publish").expect("id")),
        Some(TaskStatus::Pending)
    );

    plan.manager().run().await;

    let statuses = plan.named_statuses(&plan.manager().snapshot());
    assert_eq!(
        statuses,
        vec![
            ("publish".to_string(), TaskStatus::Canceled),
            ("build".to_string(), TaskStatus::Completed),
            ("test".to_string(), TaskStatus::Completed),
            ("lint".to_string(), TaskStatus::Failed),
        ]
    );
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let file = write_plan("[[task]\nname = ");
    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, TaskmillError::TomlError(_)), "{err:?}");
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nope.toml");
    let err = load_and_validate(&path).unwrap_err();
    match err {
        TaskmillError::ReadPlan { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn cyclic_plan_is_rejected() {
    let file = write_plan(
        r#"
[[task]]
name = "a"
cmd = "true"
after = ["b"]

[[task]]
name = "b"
cmd = "true"
after = ["a"]
"#,
    );
    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, TaskmillError::DagCycle(_)), "{err:?}");
}

#[test]
fn builder_configs_validate_like_files() {
    let raw = ConfigFileBuilder::new()
        .concurrency(0)
        .with_task(TaskConfigBuilder::new("a", "true").build())
        .raw();
    let err = taskmill::config::ConfigFile::try_from(raw).unwrap_err();
    assert!(matches!(err, TaskmillError::ConfigError(_)), "{err:?}");

    let cfg = ConfigFileBuilder::new()
        .concurrency(3)
        .abort_on_timeout(true)
        .with_task(TaskConfigBuilder::new("a", "true").priority(2).build())
        .with_task(TaskConfigBuilder::new("b", "true").after("a").timeout_ms(50).build())
        .build();
    let options = cfg.config.run_options();
    assert_eq!(options.concurrency, 3);
    assert!(options.abort_on_timeout);
}

#[test]
fn omitted_fields_take_defaults() {
    let cfg = taskmill::config::parse_and_validate("[[task]]\nname = \"solo\"\ncmd = \"true\"\n")
        .expect("valid plan");

    let options = cfg.config.run_options();
    assert_eq!(options, taskmill::RunOptions::default());

    let solo = cfg.task_by_name("solo").expect("declared");
    assert_eq!(solo.priority, 0);
    assert!(solo.after.is_empty());
    assert_eq!(solo.timeout(), None);
}
