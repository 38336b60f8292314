use crate::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Todo,
    InProgress,
    Done,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    pub fn title(self) -> &'static str {
        match self {
            Column::Todo => "Todo",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }

    /// Position in [`Column::ALL`].
    pub fn index(self) -> usize {
        match self {
            Column::Todo => 0,
            Column::InProgress => 1,
            Column::Done => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::InProgress => "inProgress",
            Column::Done => "done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct ParseColumnError(pub String);

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.key() == s)
            .ok_or_else(|| ParseColumnError(s.to_string()))
    }
}

/// The three columns of the board. A task id lives in exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanBoard {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl KanbanBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo board: tasks 1-3 in todo, 4-5 in progress, 6-7 done.
    pub fn seeded() -> Self {
        let seed = |range: std::ops::RangeInclusive<TaskId>| {
            range
                .map(|n| Task::new(n, format!("Task {n}"), format!("Description for Task {n}")))
                .collect()
        };
        Self {
            todo: seed(1..=3),
            in_progress: seed(4..=5),
            done: seed(6..=7),
        }
    }

    pub fn tasks(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    fn tasks_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    /// Moves task `id` out of `source` and onto the end of `destination`.
    ///
    /// Does nothing when `id` is not in `source` or when both columns are the
    /// same. Returns whether the board changed.
    pub fn move_task(&mut self, id: TaskId, source: Column, destination: Column) -> bool {
        if source == destination {
            return false;
        }
        let from = self.tasks_mut(source);
        let Some(position) = from.iter().position(|t| t.id == id) else {
            return false;
        };
        let task = from.remove(position);
        self.tasks_mut(destination).push(task);
        true
    }

    pub fn add_to_todo(&mut self, task: Task) {
        self.todo.push(task);
    }

    pub fn len(&self) -> usize {
        Column::ALL.iter().map(|c| self.tasks(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every id on the board, column by column.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        Column::ALL
            .into_iter()
            .flat_map(move |c| self.tasks(c).iter().map(|t| t.id))
    }

    pub fn max_id(&self) -> Option<TaskId> {
        self.ids().max()
    }

    pub fn column_of(&self, id: TaskId) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|c| self.tasks(*c).iter().any(|t| t.id == id))
    }
}
