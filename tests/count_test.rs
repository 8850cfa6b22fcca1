//! Task counting over whole plans

use mdplan::domain::{classify, task_lines, Level};
use mdplan::{count_tasks, TaskCount};
use rstest::rstest;

const RELEASE_PLAN: &str = "\
# Release 1.0

Some introduction that is not a task.

## Build
- [x] compile on linux
- [ ] compile on macos
  - install toolchain
  - [x] run the build
## Docs
- [x] write changelog
* update website
    * screenshots
    * [x] copy
";

#[rstest]
#[case("# hello", 1, 0)]
#[case("- [x] hello", 1, 1)]
#[case("### subheader", 1, 0)]
#[case("- parent\n  - child", 1, 0)]
#[case("- hello", 1, 0)]
#[case("# title\n- task", 1, 0)]
#[case("###### title\n- task", 1, 0)]
#[case("# title\n        - deeply indented task", 1, 0)]
#[case("- parent1\n  - child1\n  - parent2\n    - child2", 2, 0)]
fn given_plan_when_count_then_matches_expected(
    #[case] plan: &str,
    #[case] total: usize,
    #[case] completed: usize,
) {
    assert_eq!(count_tasks(plan), TaskCount { total, completed });
}

#[rstest]
#[case("")]
#[case("   \n\t\n")]
#[case("plain text\nmore text")]
#[case("####### seven hashes is not a header")]
#[case("-dash without space\n*star without space")]
#[case("1. ordered items are not tasks\n2. neither is this")]
fn given_only_non_task_lines_when_count_then_zero(#[case] plan: &str) {
    assert_eq!(count_tasks(plan), TaskCount { total: 0, completed: 0 });
}

#[test]
fn given_release_plan_when_count_then_counts_leaves_only() {
    // leaves: compile on linux, install toolchain, run the build,
    // write changelog, screenshots, copy
    assert_eq!(count_tasks(RELEASE_PLAN), TaskCount { total: 6, completed: 4 });
}

#[test]
fn given_same_plan_when_counted_twice_then_identical() {
    assert_eq!(count_tasks(RELEASE_PLAN), count_tasks(RELEASE_PLAN));
}

#[test]
fn given_leaf_when_marked_done_then_only_completed_changes() {
    let before = count_tasks("# Plan\n- one\n- two");
    let after = count_tasks("# Plan\n- [x] one\n- two");
    assert_eq!(after.total, before.total);
    assert_eq!(after.completed, before.completed + 1);
}

#[test]
fn given_parent_marked_done_when_count_then_completed_unchanged() {
    let before = count_tasks("- parent\n  - child");
    let after = count_tasks("- [x] parent\n  - child");
    assert_eq!(before, after);
}

#[test]
fn given_reordered_lines_when_count_then_result_may_differ() {
    // order matters: swapping a parent and its child changes the tree
    let ordered = count_tasks("- a\n  - b");
    let reordered = count_tasks("  - b\n- a");
    assert_eq!(ordered.total, 1);
    assert_eq!(reordered.total, 2);
}

#[test]
fn given_header_depths_then_each_depth_has_its_own_level() {
    let levels: Vec<i32> = task_lines("# a\n## b\n### c\n#### d\n##### e\n###### f")
        .iter()
        .map(|line| line.level.value())
        .collect();
    assert_eq!(levels, vec![-6, -5, -4, -3, -2, -1]);
}

#[test]
fn given_nested_headers_when_count_then_lighter_header_is_child() {
    // with per-depth levels "## b" is a child of "# a"; only b is a leaf
    assert_eq!(count_tasks("# a\n## b").total, 1);
    // a lighter header followed by a heavier one: both leaves
    assert_eq!(count_tasks("## a\n# b").total, 2);
}

#[test]
fn given_tab_indented_item_when_count_then_tab_is_not_indentation() {
    // "\t- b" sits at level 0, a sibling of "- a"
    assert_eq!(count_tasks("- a\n\t- b").total, 2);
    assert_eq!(task_lines("\t- b")[0].level, Level::list_item(0));
}

#[test]
fn given_checkbox_variants_when_count_then_only_lowercase_x_completes() {
    let plan = "- [x] done\n- [X] upper\n- [ ] open\n- [x]no space\n-  [x] extra space";
    assert_eq!(count_tasks(plan), TaskCount { total: 5, completed: 2 });
}

#[test]
fn given_header_with_checkbox_when_count_then_header_leaf_can_complete() {
    assert_eq!(count_tasks("## [x] shipped"), TaskCount { total: 1, completed: 1 });
}

#[test]
fn given_line_when_classify_then_header_and_list_item_are_exclusive() {
    for line in ["# h", "- l", "* l", "  - l", "## h"] {
        let class = classify(line);
        assert!(class.is_task());
        assert!(!(class.is_header && class.is_list_item), "{line}");
    }
}

#[test]
fn given_crlf_line_ending_after_bare_marker_when_count_then_not_completed() {
    // line endings are removed before completion detection, so "[x]\r" is a
    // bare marker with no whitespace after it, the same as "[x]" with LF
    assert_eq!(count_tasks("- a\r\n  - [x]\r\n"), TaskCount { total: 1, completed: 0 });
    assert_eq!(count_tasks("- a\r\n  - [x]\r\n"), count_tasks("- a\n  - [x]\n"));
    assert_eq!(count_tasks("- a\r\n  - [x] b\r\n"), TaskCount { total: 1, completed: 1 });
}
