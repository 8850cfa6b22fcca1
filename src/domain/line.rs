//! Line classification and level resolution
//!
//! A task line is either a markdown header (`#` .. `######`) or a bulleted
//! list item (`-` / `*`). Everything else in a plan is ignored.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s(.*)$").expect("valid header regex"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s(.*)$").expect("valid list item regex"));

/// Result of classifying a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_header: bool,
    pub is_list_item: bool,
}

impl Classification {
    /// A line is a task if it is a header or a list item.
    pub fn is_task(&self) -> bool {
        self.is_header || self.is_list_item
    }
}

/// Classify a line as header, list item, or neither.
pub fn classify(line: &str) -> Classification {
    Classification {
        is_header: HEADER_RE.is_match(line),
        is_list_item: LIST_ITEM_RE.is_match(line),
    }
}

/// Which marker introduced a task line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Header,
    ListItem,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Header => write!(f, "header"),
            LineKind::ListItem => write!(f, "list item"),
        }
    }
}

/// Nesting depth on a scale shared by headers and list items.
///
/// Headers occupy `-6..=-1` (`#` is -6, `######` is -1), list items use
/// their count of leading spaces. Any list item therefore nests below any
/// header, and a heavier heading is an outer parent of a lighter one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    /// Level for a header with `hashes` leading `#` characters (1..=6).
    pub fn header(hashes: usize) -> Self {
        // hashes is bounded by the header pattern
        Level(hashes as i32 - 7)
    }

    /// Level for a list item indented by `spaces` literal spaces.
    pub fn list_item(spaces: usize) -> Self {
        Level(i32::try_from(spaces).unwrap_or(i32::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<i32> for Level {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<i32> for Level {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

/// Count literal leading spaces; tabs stop the count.
fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}

/// A line of the plan recognised as a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskLine<'a> {
    /// 1-based position in the document
    pub line_number: usize,
    pub raw: &'a str,
    pub kind: LineKind,
    pub level: Level,
    /// Text after the marker and its separating whitespace
    pub description: &'a str,
}

impl<'a> TaskLine<'a> {
    /// Parse a line; returns `None` for anything that is not a task.
    pub fn parse(line_number: usize, raw: &'a str) -> Option<Self> {
        if let Some(caps) = HEADER_RE.captures(raw) {
            let hashes = caps.get(1)?.as_str().len();
            return Some(Self {
                line_number,
                raw,
                kind: LineKind::Header,
                level: Level::header(hashes),
                description: caps.get(2)?.as_str(),
            });
        }

        let caps = LIST_ITEM_RE.captures(raw)?;
        Some(Self {
            line_number,
            raw,
            kind: LineKind::ListItem,
            level: Level::list_item(leading_spaces(raw)),
            description: caps.get(1)?.as_str(),
        })
    }
}

/// Level of a task line.
pub fn level(task_line: &TaskLine<'_>) -> Level {
    task_line.level
}

/// All task lines of a plan, in document order.
pub fn task_lines(plan: &str) -> Vec<TaskLine<'_>> {
    plan.lines()
        .enumerate()
        .filter_map(|(i, line)| TaskLine::parse(i + 1, line))
        .collect()
}
