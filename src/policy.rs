//! Branch policy: decide whether a branch change may proceed, and carry it out.
//!
//! `evaluate` is pure; `execute` is the only place that mutates the repository. Callers
//! show the decision (and ask for confirmation) between the two.
use serde::Serialize;

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::{Blocker, BranchError};
use crate::runner::{CommandRunner, RepositoryState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AlreadyOnBranch,
    Switch,
    Create,
    Blocked(Blocker),
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AlreadyOnBranch => "already_on_branch",
            Action::Switch => "switch",
            Action::Create => "create",
            Action::Blocked(_) => "blocked",
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of evaluating a target branch against repository state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub branch_name: String,
    pub can_proceed: bool,
    pub action: Action,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl Decision {
    fn blocked(branch_name: &str, blocker: Blocker) -> Self {
        Self {
            branch_name: branch_name.to_string(),
            can_proceed: false,
            action: Action::Blocked(blocker),
            error: Some(blocker.message().to_string()),
            warnings: Vec::new(),
        }
    }

    fn proceed(branch_name: &str, action: Action, warning: String) -> Self {
        Self {
            branch_name: branch_name.to_string(),
            can_proceed: true,
            action,
            error: None,
            warnings: vec![warning],
        }
    }
}

/// First matching rule wins: not a repository, dirty tree, already on branch, branch
/// exists (switch), otherwise create. The branch name is not validated here; git rejects
/// bad names when the action runs.
pub fn evaluate(branch_name: &str, state: &RepositoryState) -> Decision {
    if !state.is_repository {
        return Decision::blocked(branch_name, Blocker::NotARepository);
    }
    if state.is_dirty {
        let mut d = Decision::blocked(branch_name, Blocker::DirtyWorkingTree);
        d.warnings
            .push("Commit or stash your changes before switching branches".to_string());
        return d;
    }
    if state.current_branch.as_deref() == Some(branch_name) {
        return Decision::proceed(
            branch_name,
            Action::AlreadyOnBranch,
            format!("Already on branch '{branch_name}'"),
        );
    }
    if state.known_branches.contains(branch_name) {
        Decision::proceed(
            branch_name,
            Action::Switch,
            format!("Branch '{branch_name}' exists, will switch to it"),
        )
    } else {
        Decision::proceed(
            branch_name,
            Action::Create,
            format!("Branch '{branch_name}' does not exist, will create it"),
        )
    }
}

/// Query fresh repository state through `runner` and evaluate it.
#[cfg_attr(feature = "trace", instrument(level = "debug", skip(runner)))]
pub fn check<R: CommandRunner + ?Sized>(runner: &R, branch_name: &str) -> Decision {
    let state = RepositoryState::query(runner);
    let decision = evaluate(branch_name, &state);
    #[cfg(feature = "trace")]
    tracing::debug!(action = decision.action.as_str(), "branch evaluated");
    decision
}

/// Carry out a decision. Blocked and already-on-branch decisions never touch git.
#[cfg_attr(feature = "trace", instrument(level = "debug", skip(runner, decision), fields(branch = %decision.branch_name)))]
pub fn execute<R: CommandRunner + ?Sized>(
    runner: &R,
    decision: &Decision,
) -> Result<String, BranchError> {
    let name = decision.branch_name.as_str();
    match decision.action {
        Action::Blocked(blocker) => Err(BranchError::from(blocker)),
        Action::AlreadyOnBranch => Ok(format!("Already on branch '{name}'")),
        Action::Switch => {
            let out = runner.run(&["checkout", name]);
            if out.success {
                Ok(format!("Switched to branch '{name}'"))
            } else {
                Err(BranchError::Execution(format!(
                    "Failed to switch to branch '{name}': {}",
                    out.stderr
                )))
            }
        }
        Action::Create => {
            let out = runner.run(&["checkout", "-b", name]);
            if out.success {
                Ok(format!("Created and switched to branch '{name}'"))
            } else {
                Err(BranchError::Execution(format!(
                    "Failed to create branch '{name}': {}",
                    out.stderr
                )))
            }
        }
    }
}
