//! Mouse drag gestures over the board.
//!
//! A gesture carries its transfer payload from the press on a card until the
//! release. Nothing here touches the board; a successful drop hands the
//! payload back so the caller can perform the move.

use crate::kanban_board::Column;
use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPayload {
    pub id: TaskId,
    pub source: Column,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        hover: Option<Column>,
    },
}

impl DragGesture {
    /// Begins a gesture on a card. Any stale gesture is replaced.
    pub fn start(&mut self, id: TaskId, source: Column) {
        *self = DragGesture::Dragging {
            payload: DragPayload { id, source },
            hover: Some(source),
        };
    }

    /// Marks the column under the pointer as accepting the drop.
    pub fn over(&mut self, column: Option<Column>) {
        if let DragGesture::Dragging { hover, .. } = self {
            *hover = column;
        }
    }

    /// Ends the gesture over `destination`.
    ///
    /// Returns the payload only when the task should move, i.e. when the
    /// destination differs from the column it was picked up from.
    pub fn drop_on(&mut self, destination: Column) -> Option<DragPayload> {
        match std::mem::take(self) {
            DragGesture::Dragging { payload, .. } if payload.source != destination => {
                Some(payload)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn payload(&self) -> Option<DragPayload> {
        match self {
            DragGesture::Dragging { payload, .. } => Some(*payload),
            DragGesture::Idle => None,
        }
    }

    pub fn hover(&self) -> Option<Column> {
        match self {
            DragGesture::Dragging { hover, .. } => *hover,
            DragGesture::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }
}
