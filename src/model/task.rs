use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of schedulable item a task is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    Task,
    Subtask,
    /// Zero-width point event, rendered as a diamond.
    Milestone,
}

impl TaskType {
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::Task => "Task",
            TaskType::Subtask => "Subtask",
            TaskType::Milestone => "Milestone",
        }
    }

    pub const ALL: [TaskType; 3] = [TaskType::Task, TaskType::Subtask, TaskType::Milestone];
}

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }

    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];
}

/// A single task, subtask or milestone on the board.
///
/// Identifiers are plain strings: references (`parent_id`, `assignee_id`,
/// `dependencies`) come from the surrounding application state and may point
/// at records that no longer exist. Consumers look them up with `Option`
/// semantics and skip what they cannot resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// Grouping reference. A task whose parent is a root renders indented
    /// under that root; anything else lands in the orphan tail.
    pub parent_id: Option<String>,
    pub assignee_id: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: TaskType,
    pub status: TaskStatus,
    /// Percent complete, 0–100.
    pub progress: u8,
    /// Ids of tasks this task depends on.
    pub dependencies: Vec<String>,
    pub projected_hours: u32,
    pub actual_hours: u32,
}

impl Task {
    /// Create a new task with sensible defaults and a fresh id.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            parent_id: None,
            assignee_id: None,
            start,
            end,
            kind: TaskType::Task,
            status: TaskStatus::ToDo,
            progress: 0,
            dependencies: Vec::new(),
            projected_hours: 0,
            actual_hours: 0,
        }
    }

    /// Create a new milestone pinned to a single date.
    pub fn new_milestone(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind: TaskType::Milestone,
            ..Self::new(name, date, date)
        }
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskType::Milestone
    }

    /// Inclusive duration in days. Reversed ranges clamp to a single day.
    pub fn duration_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn milestone_spans_a_single_date() {
        let m = Task::new_milestone("Launch", d(2024, 3, 1));
        assert!(m.is_milestone());
        assert_eq!(m.start, m.end);
        assert_eq!(m.duration_days(), 1);
    }

    #[test]
    fn duration_is_inclusive_and_never_negative() {
        let t = Task::new("t", d(2024, 1, 10), d(2024, 1, 12));
        assert_eq!(t.duration_days(), 3);

        let reversed = Task::new("r", d(2024, 1, 12), d(2024, 1, 10));
        assert_eq!(reversed.duration_days(), 1);
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new("a", d(2024, 1, 1), d(2024, 1, 2));
        let b = Task::new("b", d(2024, 1, 1), d(2024, 1, 2));
        assert_ne!(a.id, b.id);
    }
}
