use crate::task::{Task, TaskId};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    /// Visible with an untouched draft.
    Open,
    /// Visible and at least one field has been typed into.
    Editing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftField {
    #[default]
    Title,
    Description,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown draft field: {0}")]
pub struct ParseDraftFieldError(pub String);

impl FromStr for DraftField {
    type Err = ParseDraftFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(DraftField::Title),
            "description" => Ok(DraftField::Description),
            other => Err(ParseDraftFieldError(other.to_string())),
        }
    }
}

/// The "Add Task" form and the draft it owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskModal {
    state: ModalState,
    draft: Task,
    focus: DraftField,
}

impl TaskModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn draft(&self) -> &Task {
        &self.draft
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn open(&mut self) {
        if self.state == ModalState::Closed {
            self.state = ModalState::Open;
            self.focus = DraftField::Title;
        }
    }

    /// Replaces one field of the draft. Ignored while the modal is closed.
    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        if !self.is_open() {
            return;
        }
        let value = value.into();
        match field {
            DraftField::Title => self.draft.title = value,
            DraftField::Description => self.draft.description = value,
        }
        self.state = ModalState::Editing;
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Stamps the draft with `id`, closes the modal and returns the task.
    /// Empty titles and descriptions are accepted.
    pub fn commit(&mut self, id: TaskId) -> Option<Task> {
        if !self.is_open() {
            return None;
        }
        let task = Task { id, ..std::mem::take(&mut self.draft) };
        self.close();
        Some(task)
    }

    fn focused_value(&self) -> &str {
        match self.focus {
            DraftField::Title => &self.draft.title,
            DraftField::Description => &self.draft.description,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let mut value = self.focused_value().to_string();
        value.push(c);
        self.update_draft(self.focus, value);
    }

    pub fn backspace(&mut self) {
        let mut value = self.focused_value().to_string();
        if value.pop().is_some() {
            self.update_draft(self.focus, value);
        }
    }

    pub fn set_focus(&mut self, field: DraftField) {
        if self.is_open() {
            self.focus = field;
        }
    }

    pub fn focus_next(&mut self) {
        let next = match self.focus {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Title,
        };
        self.set_focus(next);
    }
}
