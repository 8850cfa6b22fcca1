//! mdplan: count leaf tasks in markdown outline plans
//!
//! A plan mixes headers and nested list items. Only leaves, lines with no
//! deeper line directly after them, are tasks; a leaf whose text starts with
//! `[x] ` is completed.
//!
//! ```
//! let count = mdplan::count_tasks("# Plan\n- [x] write\n- review");
//! assert_eq!((count.total, count.completed), (2, 1));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{count_tasks, TaskCount};
