//! Task counting over a whole plan

use serde::Serialize;
use tracing::trace;

use super::leaves::filter_leaves;
use super::line::task_lines;

/// Leaf task totals for one plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCount {
    pub total: usize,
    pub completed: usize,
}

impl TaskCount {
    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}

/// Count leaf tasks in `plan` and how many of them carry the `[x]` marker.
///
/// Never fails: text without any header or list item counts as `{0, 0}`.
pub fn count_tasks(plan: &str) -> TaskCount {
    let lines = task_lines(plan);
    let leaves = filter_leaves(&lines);
    let count = TaskCount {
        total: leaves.len(),
        completed: leaves.iter().filter(|leaf| leaf.completed).count(),
    };
    trace!(
        task_lines = lines.len(),
        total = count.total,
        completed = count.completed,
        "counted tasks"
    );
    count
}
