//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Source of plan text piped into the process.
pub trait InputReader: Send + Sync {
    /// Read all of standard input.
    fn read_all(&self) -> io::Result<String>;
}

/// A commit that may hold a version of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: String,
    /// Committer time with the committer's UTC offset
    pub time: DateTime<FixedOffset>,
}

/// A file located inside a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPath {
    pub repo_root: PathBuf,
    /// Path below the repository root, `/`-separated
    pub relative: String,
}

/// Read-only view of a version control history.
pub trait VersionControl: Send + Sync {
    /// Repository holding `path`; `None` outside any repository.
    fn locate(&self, path: &Path) -> io::Result<Option<TrackedPath>>;

    /// Commits reachable from HEAD; empty for a repository without commits.
    fn commits(&self, repo_root: &Path) -> io::Result<Vec<CommitInfo>>;

    /// File content at `commit`; `None` if the file does not exist there.
    fn read_at(&self, repo_root: &Path, commit: &str, relative: &str)
        -> io::Result<Option<String>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Reads the process's standard input.
#[derive(Debug, Default)]
pub struct RealStdin;

impl InputReader for RealStdin {
    fn read_all(&self) -> io::Result<String> {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    }
}

// ============================================================
// TEST DOUBLES
// ============================================================

/// In-memory filesystem for tests.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

/// Fixed stdin content for tests.
#[derive(Debug, Default)]
pub struct FixedInput(pub String);

impl InputReader for FixedInput {
    fn read_all(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// In-memory repository tracking the history of files below `root`.
///
/// Commits are returned in insertion order; each holds the content every
/// tracked file had at that commit.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    root: PathBuf,
    commits: Vec<(CommitInfo, HashMap<String, String>)>,
}

impl MemoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            commits: Vec::new(),
        }
    }

    /// Add a commit; `files` maps root-relative paths to content.
    pub fn with_commit(
        mut self,
        id: &str,
        time: DateTime<FixedOffset>,
        files: &[(&str, &str)],
    ) -> Self {
        let files = files
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect();
        self.commits.push((
            CommitInfo {
                id: id.to_string(),
                time,
            },
            files,
        ));
        self
    }
}

impl VersionControl for MemoryRepository {
    fn locate(&self, path: &Path) -> io::Result<Option<TrackedPath>> {
        Ok(path.strip_prefix(&self.root).ok().map(|relative| TrackedPath {
            repo_root: self.root.clone(),
            relative: relative.to_string_lossy().replace('\\', "/"),
        }))
    }

    fn commits(&self, _repo_root: &Path) -> io::Result<Vec<CommitInfo>> {
        Ok(self.commits.iter().map(|(commit, _)| commit.clone()).collect())
    }

    fn read_at(
        &self,
        _repo_root: &Path,
        commit: &str,
        relative: &str,
    ) -> io::Result<Option<String>> {
        Ok(self
            .commits
            .iter()
            .find(|(info, _)| info.id == commit)
            .and_then(|(_, files)| files.get(relative).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn given_memory_fs_when_reading_missing_file_then_not_found() {
        let fs = MemoryFileSystem::new().with_file("/plan.md", "- a");
        assert_eq!(fs.read_to_string(Path::new("/plan.md")).unwrap(), "- a");
        let err = fs.read_to_string(Path::new("/other.md")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn given_temp_file_when_reading_with_real_fs_then_returns_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("PLAN.md");
        std::fs::write(&path, "# plan\n- task\n").unwrap();

        let fs = RealFileSystem;
        assert_eq!(fs.read_to_string(&path).unwrap(), "# plan\n- task\n");
        assert!(fs.read_to_string(dir.path()).is_err());
    }

    #[test]
    fn given_memory_repository_when_locating_then_relative_to_root() {
        let repo = MemoryRepository::new("/repo");
        let tracked = repo.locate(Path::new("/repo/docs/PLAN.md")).unwrap().unwrap();
        assert_eq!(tracked.repo_root, PathBuf::from("/repo"));
        assert_eq!(tracked.relative, "docs/PLAN.md");
        assert!(repo.locate(Path::new("/elsewhere/PLAN.md")).unwrap().is_none());
    }

    #[test]
    fn given_memory_repository_when_reading_at_commit_then_returns_that_version() {
        let repo = MemoryRepository::new("/repo")
            .with_commit("a1", at("2024-01-01T10:00:00+00:00"), &[("PLAN.md", "- a")])
            .with_commit("b2", at("2024-01-02T10:00:00+00:00"), &[]);
        let root = Path::new("/repo");
        assert_eq!(repo.read_at(root, "a1", "PLAN.md").unwrap().as_deref(), Some("- a"));
        assert_eq!(repo.read_at(root, "b2", "PLAN.md").unwrap(), None);
        assert_eq!(repo.commits(root).unwrap().len(), 2);
    }
}
