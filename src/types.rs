use std::fmt;
use std::str::FromStr;

/// Scheduling priority. Higher values launch first.
pub type Priority = i64;

/// Identifier handed out by task registration.
///
/// Ids start at 1 and increase by one per registration; they are never
/// reused for the lifetime of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(raw: u64) -> Self {
        TaskId(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(raw: u64) -> Self {
        TaskId(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task{}", self.0)
    }
}

/// Lifecycle state of a registered task.
///
/// Transitions are one-way:
/// `Pending -> Running -> {Completed | Failed | Timeout}` and
/// `Pending -> Canceled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Registered and waiting in the ready queue.
    Pending,
    /// Body has been started and has not reported back yet.
    Running,
    /// Body finished successfully.
    Completed,
    /// Body returned an error or panicked.
    Failed,
    /// The timeout elapsed before the body finished.
    Timeout,
    /// An ancestor failed or timed out before this task could start.
    Canceled,
}

impl TaskStatus {
    /// `true` for states that can never change again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Timeout | TaskStatus::Canceled
        )
    }

    /// `true` when dependents of a task in this state must be canceled.
    pub fn cascades(self) -> bool {
        matches!(self, TaskStatus::Failed | TaskStatus::Timeout)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Timeout => "timeout",
            TaskStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "running" => Ok(TaskStatus::Running),
            "completed" => Ok(TaskStatus::Completed),
            "failed" => Ok(TaskStatus::Failed),
            "timeout" => Ok(TaskStatus::Timeout),
            "canceled" | "cancelled" => Ok(TaskStatus::Canceled),
            other => Err(format!("invalid task status: {other}")),
        }
    }
}
