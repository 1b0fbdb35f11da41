// src/config/validate.rs

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskmillError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskmillError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_task_names(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskmillError::ConfigError(
            "config must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.concurrency == 0 {
        return Err(TaskmillError::ConfigError(
            "[config].concurrency must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for task in cfg.task.iter() {
        if task.name.trim().is_empty() {
            return Err(TaskmillError::ConfigError(
                "task names must not be empty".to_string(),
            ));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(TaskmillError::ConfigError(format!(
                "task '{}' is declared more than once",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_task_dependencies(cfg: &RawConfigFile) -> Result<()> {
    let names: HashSet<&str> = cfg.task.iter().map(|t| t.name.as_str()).collect();

    for task in cfg.task.iter() {
        for dep in task.after.iter() {
            if dep == &task.name {
                return Err(TaskmillError::ConfigError(format!(
                    "task '{}' cannot depend on itself in `after`",
                    task.name
                )));
            }
            if !names.contains(dep.as_str()) {
                return Err(TaskmillError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    task.name, dep
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> task. For `after = ["A"]` on B we add A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for task in cfg.task.iter() {
        graph.add_node(task.name.as_str());
    }

    for task in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), task.name.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(TaskmillError::DagCycle(format!("task '{}'", cycle.node_id()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::{ConfigSection, TaskConfig};

    fn task(name: &str, after: &[&str]) -> TaskConfig {
        TaskConfig {
            name: name.to_string(),
            cmd: format!("echo {name}"),
            priority: 0,
            after: after.iter().map(|s| s.to_string()).collect(),
            timeout_ms: None,
        }
    }

    fn raw(tasks: Vec<TaskConfig>) -> RawConfigFile {
        RawConfigFile {
            config: ConfigSection::default(),
            task: tasks,
        }
    }

    #[test]
    fn accepts_valid_dag() {
        let cfg = ConfigFile::try_from(raw(vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &["a", "b"]),
        ]));
        assert!(cfg.is_ok());
    }

    #[test]
    fn rejects_empty_config() {
        let err = ConfigFile::try_from(raw(vec![])).unwrap_err();
        assert!(matches!(err, TaskmillError::ConfigError(_)));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let mut cfg = raw(vec![task("a", &[])]);
        cfg.config.concurrency = 0;
        let err = ConfigFile::try_from(cfg).unwrap_err();
        assert!(err.to_string().contains("concurrency"), "{err}");
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = ConfigFile::try_from(raw(vec![task("a", &[]), task("a", &[])])).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn rejects_unknown_and_self_dependencies() {
        let err = ConfigFile::try_from(raw(vec![task("a", &["nope"])])).unwrap_err();
        assert!(err.to_string().contains("unknown dependency"), "{err}");

        let err = ConfigFile::try_from(raw(vec![task("a", &["a"])])).unwrap_err();
        assert!(err.to_string().contains("itself"), "{err}");
    }

    #[test]
    fn rejects_cycles() {
        let err = ConfigFile::try_from(raw(vec![
            task("a", &["c"]),
            task("b", &["a"]),
            task("c", &["b"]),
        ]))
        .unwrap_err();
        assert!(matches!(err, TaskmillError::DagCycle(_)));
    }
}
