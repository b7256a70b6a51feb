//! Git adapter for staging generated site files.
//!
//! Shells out to `git`; deployment policy lives in the CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Errors from interacting with a git repository.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git executable is not available in PATH")]
    NotInstalled,

    #[error("{} is not inside a git work tree", path.display())]
    NotARepository { path: PathBuf },

    #[error("git add matched no files: {pathspec}")]
    PathspecMismatch { pathspec: String },

    #[error("git command failed: git {args} ({message})")]
    CommandFailed { args: String, message: String },
}

/// Thin client around the `git` CLI, rooted at a working directory.
#[derive(Debug, Clone)]
pub struct GitClient {
    work_dir: PathBuf,
}

impl GitClient {
    /// Returns true if `git` is available in PATH.
    pub fn is_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Client running commands in `work_dir`. No repository check is made.
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self {
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// `git add` the given paths, relative to the working directory.
    pub fn stage(&self, paths: &[&str]) -> Result<(), GitError> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        run_git(&self.work_dir, &args)?;
        log::info!(
            "event=git_staged module=git work_dir={} paths={}",
            self.work_dir.display(),
            paths.join(",")
        );
        Ok(())
    }

    /// Output of `git status --short`.
    pub fn status_short(&self) -> Result<String, GitError> {
        run_git(&self.work_dir, &["status", "--short"])
    }
}

fn run_git(cwd: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("LC_ALL", "C")
        .output()
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                GitError::NotInstalled
            } else {
                GitError::CommandFailed {
                    args: args.join(" "),
                    message: err.to_string(),
                }
            }
        })?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(classify_failure(cwd, args, stderr))
}

/// Map git's stderr onto the failures deploy reports differently.
fn classify_failure(cwd: &Path, args: &[&str], stderr: String) -> GitError {
    let lowered = stderr.to_ascii_lowercase();
    if lowered.contains("not a git repository") {
        return GitError::NotARepository {
            path: cwd.to_path_buf(),
        };
    }
    if let Some(pathspec) = stderr
        .lines()
        .find_map(|line| line.strip_prefix("fatal: pathspec '"))
        .and_then(|rest| rest.split_once("' did not match any files"))
        .map(|(pathspec, _)| pathspec.to_string())
    {
        return GitError::PathspecMismatch { pathspec };
    }
    GitError::CommandFailed {
        args: args.join(" "),
        message: if stderr.is_empty() {
            "unknown error".to_string()
        } else {
            stderr
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_outside_a_repository_fails() {
        if !GitClient::is_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("temp dir should be created");
        std::fs::write(dir.path().join("sitemap.xml"), "<urlset/>")
            .expect("file should be written");
        let client = GitClient::new(dir.path());
        let err = client
            .stage(&["sitemap.xml"])
            .expect_err("staging outside a repository should fail");
        assert!(matches!(err, GitError::NotARepository { .. }), "{err}");
    }

    #[test]
    fn failures_are_classified_from_stderr() {
        let cwd = Path::new("/site");
        assert!(matches!(
            classify_failure(
                cwd,
                &["add"],
                "fatal: not a git repository (or any of the parent directories): .git".to_string()
            ),
            GitError::NotARepository { path } if path == cwd
        ));
        assert!(matches!(
            classify_failure(
                cwd,
                &["add", "--", "sitemap.xml"],
                "fatal: pathspec 'sitemap.xml' did not match any files".to_string()
            ),
            GitError::PathspecMismatch { pathspec } if pathspec == "sitemap.xml"
        ));
        match classify_failure(cwd, &["status"], String::new()) {
            GitError::CommandFailed { args, message } => {
                assert_eq!(args, "status");
                assert_eq!(message, "unknown error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn staging_a_missing_path_reports_the_pathspec() {
        if !GitClient::is_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("temp dir should be created");
        run_git(dir.path(), &["init", "--quiet"]).expect("git init should succeed");
        let err = GitClient::new(dir.path())
            .stage(&["sitemap.xml"])
            .expect_err("staging a missing file should fail");
        assert!(
            matches!(&err, GitError::PathspecMismatch { pathspec } if pathspec == "sitemap.xml"),
            "{err}"
        );
    }

    #[test]
    fn stage_and_status_inside_a_fresh_repository() {
        if !GitClient::is_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("temp dir should be created");
        run_git(dir.path(), &["init", "--quiet"]).expect("git init should succeed");
        std::fs::write(dir.path().join("sitemap.xml"), "<urlset/>")
            .expect("file should be written");

        let client = GitClient::new(dir.path());
        client
            .stage(&["sitemap.xml"])
            .expect("staging should succeed");
        let status = client.status_short().expect("status should succeed");
        assert!(status.contains("A  sitemap.xml"), "status: {status}");
    }
}
