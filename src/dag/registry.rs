// src/dag/registry.rs

//! Arena of task records indexed by id.

use crate::dag::task_info::TaskRecord;
use crate::types::{TaskId, TaskStatus};

/// Stores every registered task. Ids are dense (1, 2, 3, ...) so the record
/// for id `n` lives at index `n - 1`.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    records: Vec<TaskRecord>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next registration will receive.
    pub fn next_id(&self) -> TaskId {
        TaskId::new(self.records.len() as u64 + 1)
    }

    /// Store a record built for `next_id()` and return its id.
    pub fn insert(&mut self, record: TaskRecord) -> TaskId {
        debug_assert_eq!(record.id, self.next_id());
        let id = record.id;
        self.records.push(record);
        id
    }

    fn index_of(id: TaskId) -> Option<usize> {
        usize::try_from(id.get()).ok()?.checked_sub(1)
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskRecord> {
        self.records.get(Self::index_of(id)?)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskRecord> {
        let idx = Self::index_of(id)?;
        self.records.get_mut(idx)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Status of `id`, or `None` if it was never registered.
    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        self.get(id).map(|r| r.status)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter()
    }
}
