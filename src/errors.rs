//! Error mapping guide:
//! - Every BranchError maps to exit code 1; cancellation is not an error.
//! - Display texts are user-visible and stable (tests/UX depend on them).
use std::fmt;

/// Why a branch change is refused before any git mutation is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    NotARepository,
    DirtyWorkingTree,
}

impl Blocker {
    pub fn message(&self) -> &'static str {
        match self {
            Blocker::NotARepository => "not a repository",
            Blocker::DirtyWorkingTree => "uncommitted changes present",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchError {
    /// The working directory is not under version control.
    NotARepository,
    /// Uncommitted changes block any branch change.
    DirtyWorkingTree,
    /// The mutating git invocation failed; carries the full user-facing message.
    Execution(String),
    /// Malformed invocation or configuration.
    Usage(String),
}

impl From<Blocker> for BranchError {
    fn from(b: Blocker) -> Self {
        match b {
            Blocker::NotARepository => BranchError::NotARepository,
            Blocker::DirtyWorkingTree => BranchError::DirtyWorkingTree,
        }
    }
}

impl fmt::Display for BranchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchError::NotARepository => f.write_str(Blocker::NotARepository.message()),
            BranchError::DirtyWorkingTree => f.write_str(Blocker::DirtyWorkingTree.message()),
            BranchError::Execution(s) | BranchError::Usage(s) => f.write_str(s),
        }
    }
}

impl std::error::Error for BranchError {}

/// Convert BranchError to a process exit code.
pub fn exit_code_for_error(_e: &BranchError) -> u8 {
    1
}
