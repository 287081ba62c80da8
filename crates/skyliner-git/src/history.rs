use std::path::PathBuf;
use std::process::{Command, Output};

use skyliner_core::revision::revision_format;

use crate::GitError;

/// Produces the raw `git rev-list --format` text for a commit range.
pub trait HistorySource {
    fn rev_list(&self, before: &str, after: &str) -> Result<String, GitError>;
}

/// Runs the `git` executable found on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    git_dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new(git_dir: Option<PathBuf>) -> Self {
        Self { git_dir }
    }

    /// Run a git subcommand and return its stdout.
    ///
    /// A non-zero exit or anything written to stderr is an error.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        self.run_with(args, StderrPolicy::Fail)
    }

    pub fn run_with(&self, args: &[&str], stderr: StderrPolicy) -> Result<String, GitError> {
        let mut cmd = Command::new("git");
        if let Some(git_dir) = &self.git_dir {
            cmd.arg("--git-dir").arg(git_dir);
        }
        let output = cmd.args(args).output()?;
        check_output(args, output, stderr)
    }
}

/// What a successful git run that still wrote to stderr means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrPolicy {
    Fail,
    Log,
}

fn check_output(args: &[&str], output: Output, policy: StderrPolicy) -> Result<String, GitError> {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let failed = !output.status.success() || (policy == StderrPolicy::Fail && !stderr.is_empty());
    if failed {
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            status: output.status.to_string(),
            stderr,
        });
    }
    if !stderr.is_empty() {
        tracing::warn!("git {}: {}", args.join(" "), stderr);
    }

    Ok(String::from_utf8(output.stdout)?)
}

impl HistorySource for GitCli {
    fn rev_list(&self, before: &str, after: &str) -> Result<String, GitError> {
        let format = format!("--format={}", revision_format());
        let range = format!("{before}..{after}");
        tracing::debug!("git rev-list --reverse {}", range);
        self.run(&["rev-list", "--reverse", &format, &range])
    }
}
