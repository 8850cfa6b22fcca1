//! Plan service
//!
//! Reads plan documents and reports their leaf task progress.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{count_tasks, filter_leaves, task_lines, LineKind, OutlineTree, TaskCount};
use crate::infrastructure::traits::{CommitInfo, FileSystem, InputReader, VersionControl};

/// Where a plan's text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    File(PathBuf),
    Stdin,
}

impl PlanSource {
    /// `-` selects stdin, anything else is a path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg == Path::new("-") {
            PlanSource::Stdin
        } else {
            PlanSource::File(arg.to_path_buf())
        }
    }
}

impl fmt::Display for PlanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanSource::File(path) => write!(f, "{}", path.display()),
            PlanSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Progress of one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub source: String,
    pub total: usize,
    pub completed: usize,
    /// Leaves not covered by their own or an ancestor's `[x]`
    pub outstanding: usize,
}

impl PlanReport {
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        }
    }
}

/// A leaf task, detached from the plan text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafEntry {
    pub line_number: usize,
    pub level: i32,
    pub kind: LineKind,
    pub description: String,
    pub completed: bool,
}

/// Task totals of a plan as committed at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanVersion {
    pub commit: String,
    pub date: DateTime<FixedOffset>,
    /// `completed` also counts leaves finished through a marked ancestor
    pub tasks: TaskCount,
}

impl PlanVersion {
    fn new(commit: &CommitInfo, text: &str) -> Self {
        let tree = OutlineTree::from_plan(text);
        let total = tree.count().total;
        Self {
            commit: commit.id.clone(),
            date: commit.time,
            tasks: TaskCount {
                total,
                completed: total - tree.outstanding(),
            },
        }
    }
}

/// Every committed version of a plan, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanHistory {
    pub versions: Vec<PlanVersion>,
}

/// Service for counting and inspecting plans.
pub struct PlanService {
    fs: Arc<dyn FileSystem>,
    input: Arc<dyn InputReader>,
    vcs: Arc<dyn VersionControl>,
}

impl PlanService {
    /// Create a new plan service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn InputReader>,
        vcs: Arc<dyn VersionControl>,
    ) -> Self {
        Self { fs, input, vcs }
    }

    /// Read the text of a plan.
    pub fn read(&self, source: &PlanSource) -> ApplicationResult<String> {
        match source {
            PlanSource::File(path) => {
                debug!("read: path={}", path.display());
                self.fs.read_to_string(path).with_path_context("read plan", path)
            }
            PlanSource::Stdin => self.input.read_all().with_input_context("read plan from stdin"),
        }
    }

    /// Report progress for plan text that is already in memory.
    pub fn summarize_text(&self, source: &str, text: &str) -> PlanReport {
        let count = count_tasks(text);
        let outstanding = OutlineTree::from_plan(text).outstanding();
        PlanReport {
            source: source.to_string(),
            total: count.total,
            completed: count.completed,
            outstanding,
        }
    }

    #[instrument(level = "debug", skip(self, source), fields(source = %source))]
    pub fn summarize(&self, source: &PlanSource) -> ApplicationResult<PlanReport> {
        let text = self.read(source)?;
        let report = self.summarize_text(&source.to_string(), &text);
        debug!(
            total = report.total,
            completed = report.completed,
            "summarized plan"
        );
        Ok(report)
    }

    /// Summarize several plans in parallel.
    ///
    /// Results keep the order of `sources`; a failing plan does not affect the others.
    #[instrument(level = "debug", skip(self, sources), fields(count = sources.len()))]
    pub fn summarize_all(&self, sources: &[PlanSource]) -> Vec<ApplicationResult<PlanReport>> {
        sources
            .par_iter()
            .map(|source| self.summarize(source))
            .collect()
    }

    /// Leaf tasks of plan text, in document order.
    pub fn leaves_text(&self, text: &str) -> Vec<LeafEntry> {
        filter_leaves(&task_lines(text))
            .into_iter()
            .map(|leaf| LeafEntry {
                line_number: leaf.line.line_number,
                level: leaf.line.level.value(),
                kind: leaf.line.kind,
                description: leaf.line.description.trim().to_string(),
                completed: leaf.completed,
            })
            .collect()
    }

    #[instrument(level = "debug", skip(self, source), fields(source = %source))]
    pub fn leaves(&self, source: &PlanSource) -> ApplicationResult<Vec<LeafEntry>> {
        let text = self.read(source)?;
        Ok(self.leaves_text(&text))
    }

    /// Render the outline of plan text as an indented tree.
    pub fn render_tree_text(&self, source: &str, text: &str) -> String {
        OutlineTree::from_plan(text).to_tree_string(source).to_string()
    }

    #[instrument(level = "debug", skip(self, source), fields(source = %source))]
    pub fn render_tree(&self, source: &PlanSource) -> ApplicationResult<String> {
        let text = self.read(source)?;
        Ok(self.render_tree_text(&source.to_string(), &text))
    }

    /// Task totals of every commit reachable from HEAD that holds the plan.
    ///
    /// Commits where the plan is missing or empty are skipped. Versions are
    /// sorted by commit time; commits sharing a time keep log order.
    #[instrument(level = "debug", skip(self))]
    pub fn history(&self, path: &Path) -> ApplicationResult<PlanHistory> {
        let tracked = self
            .vcs
            .locate(path)
            .with_input_context("locate git repository")?
            .ok_or_else(|| ApplicationError::NotInRepository(path.to_path_buf()))?;
        let commits = self
            .vcs
            .commits(&tracked.repo_root)
            .with_input_context("list commits")?;

        let found: Vec<Option<PlanVersion>> = commits
            .par_iter()
            .map(|commit| -> ApplicationResult<Option<PlanVersion>> {
                let text = self
                    .vcs
                    .read_at(&tracked.repo_root, &commit.id, &tracked.relative)
                    .with_input_context(&format!("read {} at {}", tracked.relative, commit.id))?;
                Ok(text
                    .filter(|text| !text.is_empty())
                    .map(|text| PlanVersion::new(commit, &text)))
            })
            .collect::<ApplicationResult<_>>()?;

        let mut versions: Vec<PlanVersion> = found.into_iter().flatten().collect();
        versions.sort_by_key(|version| version.date);
        debug!(
            commits = commits.len(),
            versions = versions.len(),
            "collected plan history"
        );
        Ok(PlanHistory { versions })
    }
}
