//! Git command runner: executes one git subcommand at a time against a fixed working
//! directory and derives repository state from its textual output.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::util::{ExecRequest, ExecService};

/// Captured result of a single git invocation; stdout/stderr are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into().trim().to_string(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into().trim().to_string(),
        }
    }
}

/// Runs git subcommands. `argv` excludes the program name.
///
/// Implementations never return errors: timeouts and launch failures are reported as a
/// failed `CommandOutput` whose stderr describes the problem.
pub trait CommandRunner {
    fn run(&self, argv: &[&str]) -> CommandOutput;

    /// True iff the metadata directory resolves.
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--git-dir"]).success
    }

    /// Current branch name; None when detached or when the query fails.
    fn current_branch(&self) -> Option<String> {
        let out = self.run(&["branch", "--show-current"]);
        if out.success && !out.stdout.is_empty() {
            Some(out.stdout)
        } else {
            None
        }
    }

    /// Local and remote branch names with remote prefixes stripped.
    ///
    /// Color and column layout are forced off so `color.branch`/`column.ui` config cannot
    /// leak escape codes or reflowed lines into the names.
    fn all_branches(&self) -> BTreeSet<String> {
        let out = self.run(&["branch", "-a", "--no-color", "--no-column"]);
        if !out.success {
            return BTreeSet::new();
        }
        parse_branch_list(&out.stdout)
    }

    /// True iff porcelain status reports any change, staged or not.
    fn is_dirty(&self) -> bool {
        let out = self.run(&["status", "--porcelain"]);
        out.success && out.stdout.lines().any(|l| !l.trim().is_empty())
    }
}

/// Parse `git branch -a` output into bare branch names.
///
/// `* main` -> `main`, `+ wt` (checked out in a linked worktree) -> `wt`,
/// `remotes/origin/x` -> `x`, `remotes/upstream/x` -> `upstream/x`.
/// Symbolic refs (`remotes/origin/HEAD -> origin/main`) and the placeholders git prints
/// when no branch is checked out (`(HEAD detached at 1a2b3c)`, `(no branch, rebasing x)`)
/// are skipped.
pub fn parse_branch_list(output: &str) -> BTreeSet<String> {
    let mut branches = BTreeSet::new();
    for line in output.lines() {
        let entry = line.trim().trim_start_matches(['*', '+']).trim();
        if entry.is_empty() || is_placeholder(entry) || entry.contains(" -> ") {
            continue;
        }
        let name = match entry.strip_prefix("remotes/") {
            Some(remote) => remote.strip_prefix("origin/").unwrap_or(remote),
            None => entry,
        };
        if !name.is_empty() {
            branches.insert(name.to_string());
        }
    }
    branches
}

fn is_placeholder(entry: &str) -> bool {
    entry.starts_with("(HEAD detached ") || entry.starts_with("(no branch")
}

/// `CommandRunner` backed by a real git binary.
#[derive(Debug, Clone)]
pub struct GitRunner {
    git: PathBuf,
    workdir: PathBuf,
    env: Vec<(String, String)>,
    exec: ExecService,
}

impl GitRunner {
    pub fn new(git: impl Into<PathBuf>, workdir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            git: git.into(),
            workdir: workdir.into(),
            env: Vec::new(),
            exec: ExecService::new(timeout),
        }
    }

    /// Extra environment for every git invocation, on top of the inherited one.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn git(&self) -> &Path {
        &self.git
    }

    pub fn timeout(&self) -> Duration {
        self.exec.default_timeout()
    }
}

impl CommandRunner for GitRunner {
    #[cfg_attr(feature = "trace", instrument(level = "debug", skip(self), fields(workdir = %self.workdir.display())))]
    fn run(&self, argv: &[&str]) -> CommandOutput {
        let mut request = ExecRequest::new(self.git.as_os_str())
            .args(argv.iter().copied())
            .cwd(&self.workdir)
            // Keep porcelain/branch output stable regardless of the user's locale.
            .env("LC_ALL", "C");
        for (key, value) in &self.env {
            request = request.env(key, value);
        }
        match self.exec.run(request) {
            Ok(out) => {
                #[cfg(feature = "trace")]
                tracing::debug!(status = ?out.status, duration = ?out.duration, "git finished");
                CommandOutput {
                    success: out.status.success(),
                    stdout: out.stdout.trim().to_string(),
                    stderr: out.stderr.trim().to_string(),
                }
            }
            Err(e) => {
                #[cfg(feature = "trace")]
                tracing::warn!(error = %e, "git invocation failed");
                CommandOutput::failed(e.to_string())
            }
        }
    }
}

/// Repository facts gathered immediately before a decision. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryState {
    pub current_branch: Option<String>,
    pub known_branches: BTreeSet<String>,
    pub is_dirty: bool,
    pub is_repository: bool,
}

impl RepositoryState {
    /// Query fresh state. When the repository probe fails nothing else is queried.
    pub fn query<R: CommandRunner + ?Sized>(runner: &R) -> Self {
        if !runner.is_repository() {
            return Self::default();
        }
        Self {
            is_repository: true,
            is_dirty: runner.is_dirty(),
            current_branch: runner.current_branch(),
            known_branches: runner.all_branches(),
        }
    }
}
