//! Check whether a git branch can be safely created or switched to, and optionally do it.
//!
//! The flow is query, evaluate, confirm, execute:
//! - `runner` talks to git and derives a `RepositoryState`.
//! - `policy::evaluate` turns that state into a `Decision` without side effects.
//! - `policy::execute` performs the checkout the decision implies.
//!
//! Confirmation lives in the binary; nothing in this library reads from stdin except
//! `prompt::confirm`, which takes its input as a parameter.

pub mod color;
pub mod config;
pub mod errors;
pub mod policy;
pub mod prompt;
pub mod report;
pub mod runner;
#[cfg(feature = "trace")]
pub mod telemetry;
pub mod util;

pub use color::{
    color_enabled_stderr, color_enabled_stdout, log_error_stderr, log_info_stderr,
    log_warn_stderr, paint, set_color_mode, ColorMode,
};
pub use config::{Overrides, Settings};
pub use errors::{exit_code_for_error, Blocker, BranchError};
pub use policy::{check, evaluate, execute, Action, Decision};
pub use runner::{parse_branch_list, CommandOutput, CommandRunner, GitRunner, RepositoryState};
