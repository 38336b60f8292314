use crate::task::TaskId;
use chrono::Utc;

/// Hands out task ids based on the wall clock in milliseconds.
///
/// Two tasks created within the same millisecond, or after the clock steps
/// backwards, still get distinct ids: each id is at least one past the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskIdGenerator {
    last: TaskId,
}

impl TaskIdGenerator {
    /// Starts above `floor`, normally the largest id already on the board.
    pub fn starting_after(floor: Option<TaskId>) -> Self {
        Self {
            last: floor.unwrap_or(0).max(0),
        }
    }

    pub fn next(&mut self) -> TaskId {
        self.next_at(Utc::now().timestamp_millis())
    }

    pub fn next_at(&mut self, now_ms: TaskId) -> TaskId {
        self.last = now_ms.max(self.last + 1);
        self.last
    }
}
