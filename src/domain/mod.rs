//! Domain layer: plan parsing and task counting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod count;
pub mod leaves;
pub mod line;

pub use arena::{NodeData, OutlineNode, OutlineTree};
pub use count::{count_tasks, TaskCount};
pub use leaves::{filter_leaves, is_completed, LeafTask};
pub use line::{classify, level, task_lines, Classification, Level, LineKind, TaskLine};
