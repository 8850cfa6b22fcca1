//! Git history through the `git` command line

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::DateTime;
use tracing::{debug, trace};

use super::traits::{CommitInfo, TrackedPath, VersionControl};

/// Runs the `git` binary found on `PATH`.
#[derive(Debug, Default)]
pub struct GitCli;

fn git(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(dir);
    cmd
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Parse `git log --format='%H %cI'` output.
fn parse_log(stdout: &str) -> io::Result<Vec<CommitInfo>> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (id, date) = line.trim().split_once(' ').ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, format!("bad log line: {line}"))
            })?;
            let time = DateTime::parse_from_rfc3339(date)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            Ok(CommitInfo {
                id: id.to_string(),
                time,
            })
        })
        .collect()
}

impl VersionControl for GitCli {
    fn locate(&self, path: &Path) -> io::Result<Option<TrackedPath>> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", path.display()),
            )
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let output = git(dir)
            .args(["rev-parse", "--show-toplevel", "--show-prefix"])
            .output()?;
        if !output.status.success() {
            debug!("no repository for {}: {}", path.display(), stderr_of(&output));
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut lines = stdout.lines();
        let root = lines.next().unwrap_or_default().trim();
        let prefix = lines.next().unwrap_or_default().trim();
        if root.is_empty() {
            return Ok(None);
        }

        Ok(Some(TrackedPath {
            repo_root: PathBuf::from(root),
            relative: format!("{}{}", prefix, file_name.to_string_lossy()),
        }))
    }

    fn commits(&self, repo_root: &Path) -> io::Result<Vec<CommitInfo>> {
        let head = git(repo_root)
            .args(["rev-parse", "--verify", "--quiet", "HEAD"])
            .output()?;
        if !head.status.success() {
            return Ok(Vec::new());
        }

        let output = git(repo_root)
            .args(["log", "--format=%H %cI", "HEAD"])
            .output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "git log failed: {}",
                stderr_of(&output)
            )));
        }
        let commits = parse_log(&String::from_utf8_lossy(&output.stdout))?;
        debug!("{} commit(s) in {}", commits.len(), repo_root.display());
        Ok(commits)
    }

    fn read_at(
        &self,
        repo_root: &Path,
        commit: &str,
        relative: &str,
    ) -> io::Result<Option<String>> {
        let output = git(repo_root)
            .arg("show")
            .arg(format!("{commit}:{relative}"))
            .output()?;
        if !output.status.success() {
            trace!("{relative} absent at {commit}");
            return Ok(None);
        }
        Ok(String::from_utf8(output.stdout).ok())
    }
}
