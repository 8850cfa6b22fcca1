//! Leaf detection and completion
//!
//! A task line is a parent exactly when the task line right after it sits at
//! a strictly greater level. Its children are the contiguous run of deeper
//! lines that follow, so the first follower alone decides whether any child
//! exists. Level jumps of any size are accepted as they come.

use std::iter;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use super::line::TaskLine;

static COMPLETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[x\]\s").expect("valid completion regex"));

/// A task line without children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafTask<'a> {
    pub line: TaskLine<'a>,
    pub completed: bool,
}

impl<'a> LeafTask<'a> {
    pub fn new(line: TaskLine<'a>) -> Self {
        Self {
            completed: is_completed(line.description),
            line,
        }
    }
}

/// True if `description` starts with the `[x]` marker (lowercase only)
/// followed by whitespace. Leading whitespace is allowed.
pub fn is_completed(description: &str) -> bool {
    COMPLETED_RE.is_match(description)
}

/// Keep only the leaves of `lines`, in their original order.
pub fn filter_leaves<'a>(lines: &[TaskLine<'a>]) -> Vec<LeafTask<'a>> {
    lines
        .iter()
        .map(Some)
        .chain(iter::once(None))
        .tuple_windows()
        .filter_map(|(current, next)| {
            let current = current?;
            match next {
                Some(next) if next.level > current.level => None,
                _ => Some(LeafTask::new(*current)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line::task_lines;
    use rstest::rstest;

    fn leaf_descriptions(plan: &str) -> Vec<&str> {
        filter_leaves(&task_lines(plan))
            .into_iter()
            .map(|leaf| leaf.line.description)
            .collect()
    }

    #[test]
    fn given_no_task_lines_when_filter_then_empty() {
        assert!(filter_leaves(&[]).is_empty());
    }

    #[test]
    fn given_single_line_when_filter_then_it_is_a_leaf() {
        assert_eq!(leaf_descriptions("- only"), vec!["only"]);
    }

    #[test]
    fn given_last_line_shallower_than_previous_when_filter_then_last_is_leaf() {
        assert_eq!(leaf_descriptions("  - deep\n- shallow"), vec!["deep", "shallow"]);
    }

    #[test]
    fn given_parent_with_child_when_filter_then_only_child_kept() {
        assert_eq!(leaf_descriptions("- parent\n  - child"), vec!["child"]);
    }

    #[test]
    fn given_siblings_when_filter_then_all_kept() {
        assert_eq!(leaf_descriptions("- a\n- b\n- c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_header_sections_when_filter_then_headers_with_items_are_parents() {
        let plan = "# Plan\n## Empty section\n## Work\n- one\n  - one.a\n- two";
        assert_eq!(leaf_descriptions(plan), vec!["Empty section", "one.a", "two"]);
    }

    #[test]
    fn given_level_jump_when_filter_then_compares_levels_only() {
        let plan = "- first\n      - far deeper\n  - back up a bit";
        assert_eq!(leaf_descriptions(plan), vec!["far deeper", "back up a bit"]);
    }

    #[test]
    fn given_non_task_lines_between_when_filter_then_they_are_ignored() {
        let plan = "- parent\n\nsome prose\n  - child";
        assert_eq!(leaf_descriptions(plan), vec!["child"]);
    }

    #[rstest]
    #[case("[x] done", true)]
    #[case("  [x] indented", true)]
    #[case("[x]\ttab", true)]
    #[case("[X] upper", false)]
    #[case("[ ] open", false)]
    #[case("[x]", false)]
    #[case("[x]done", false)]
    #[case("done [x] later", false)]
    fn given_description_when_is_completed_then_matches_lowercase_marker(
        #[case] description: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_completed(description), expected);
    }

    #[test]
    fn given_leaves_when_filter_then_completion_is_derived() {
        let leaves = filter_leaves(&task_lines("- [x] a\n- b"));
        assert!(leaves[0].completed);
        assert!(!leaves[1].completed);
    }
}
